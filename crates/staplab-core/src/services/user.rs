use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::{fetch, store_error};
use crate::domain::{Record, User, UserFields, coalesce, mask_email, present};
use crate::error::DomainError;
use crate::ports::{AuthError, IssuedToken, PasswordService, TokenService, UserRepository};

const DUPLICATE_EMAIL: &str = "Email already registered";

/// Administrator accounts and authentication.
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl UserService {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            repo,
            passwords,
            tokens,
        }
    }

    pub async fn create(&self, fields: UserFields) -> Result<User, DomainError> {
        let (Some(fullname), Some(email), Some(password)) = (
            present(&fields.fullname),
            present(&fields.email),
            present(&fields.password),
        ) else {
            return Err(DomainError::validation("All fields are required"));
        };
        validate_email(email)?;

        let user = User::new(
            fullname.to_owned(),
            email.to_owned(),
            self.passwords.hash(password)?,
        );
        let id = user.id;
        let saved = self
            .repo
            .insert(user)
            .await
            .map_err(|e| store_error(e, User::KIND, id, DUPLICATE_EMAIL))?;

        tracing::info!(user_id = %saved.id, email = %mask_email(&saved.email), "User created");
        Ok(saved)
    }

    /// Create the account unless one is already registered under its email.
    /// Returns the new user, or `None` when nothing had to be created.
    pub async fn ensure(&self, fields: UserFields) -> Result<Option<User>, DomainError> {
        if let Some(email) = present(&fields.email) {
            if self.repo.find_by_email(email).await?.is_some() {
                return Ok(None);
            }
        }
        self.create(fields).await.map(Some)
    }

    pub async fn get(&self, id: Uuid) -> Result<User, DomainError> {
        fetch(&*self.repo, id).await
    }

    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.repo.find_all().await?)
    }

    /// Partial update; a supplied password is re-hashed.
    pub async fn update(&self, id: Uuid, fields: UserFields) -> Result<User, DomainError> {
        let existing: User = fetch(&*self.repo, id).await?;
        if let Some(email) = present(&fields.email) {
            validate_email(email)?;
        }
        let password_hash = match present(&fields.password) {
            Some(password) => self.passwords.hash(password)?,
            None => existing.password_hash.clone(),
        };

        let revised = User {
            fullname: coalesce(&fields.fullname, &existing.fullname),
            email: coalesce(&fields.email, &existing.email),
            password_hash,
            updated_at: Utc::now(),
            ..existing
        };
        let saved = self
            .repo
            .update(revised)
            .await
            .map_err(|e| store_error(e, User::KIND, id, DUPLICATE_EMAIL))?;

        tracing::info!(user_id = %id, "User updated");
        Ok(saved)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        fetch::<User, _>(&*self.repo, id).await?;
        self.repo
            .delete(id)
            .await
            .map_err(|e| store_error(e, User::KIND, id, DUPLICATE_EMAIL))?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    /// Check credentials and issue an access token. Unknown email and wrong
    /// password fail the same way.
    pub async fn login(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<IssuedToken, DomainError> {
        let (Some(email), Some(password)) = (
            email.filter(|s| !s.is_empty()),
            password.filter(|s| !s.is_empty()),
        ) else {
            return Err(DomainError::validation("Email and password are required"));
        };

        let Some(user) = self.repo.find_by_email(email).await? else {
            tracing::warn!(email = %mask_email(email), "Login for unknown email");
            return Err(AuthError::InvalidCredentials.into());
        };
        if !self.passwords.verify(password, &user.password_hash)? {
            tracing::warn!(user_id = %user.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let access_token = self.tokens.generate_token(user.id, &user.email)?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(IssuedToken {
            access_token,
            expires_in: u64::try_from(self.tokens.expiration_seconds()).unwrap_or(0),
        })
    }

    /// Replace the password of the account registered under `email`.
    pub async fn reset_password(
        &self,
        email: Option<&str>,
        new_password: Option<&str>,
    ) -> Result<(), DomainError> {
        let (Some(email), Some(new_password)) = (
            email.filter(|s| !s.is_empty()),
            new_password.filter(|s| !s.is_empty()),
        ) else {
            return Err(DomainError::validation("Email and new password are required"));
        };

        let Some(user) = self.repo.find_by_email(email).await? else {
            return Err(DomainError::NotFoundByKey {
                entity_type: User::KIND,
            });
        };
        let id = user.id;
        let revised = User {
            password_hash: self.passwords.hash(new_password)?,
            updated_at: Utc::now(),
            ..user
        };
        self.repo
            .update(revised)
            .await
            .map_err(|e| store_error(e, User::KIND, id, DUPLICATE_EMAIL))?;

        tracing::info!(user_id = %id, "Password reset");
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<(), DomainError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(DomainError::validation("Invalid email address")),
    }
}
