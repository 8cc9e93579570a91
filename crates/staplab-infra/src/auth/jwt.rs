//! JWT token service implementation.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use staplab_core::ports::{AuthError, TokenClaims, TokenService};

const DEFAULT_SECRET: &str = "change-me-in-production";

/// JWT token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            // One week, the session length admins are used to.
            expiration_hours: 168,
            issuer: "staplab-api".to_string(),
        }
    }
}

/// Internal JWT claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user_id
    email: String,
    exp: i64,
    iat: i64,
    iss: String,
}

/// JWT-based token service (HS256).
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    /// Build from the process environment; see [`JwtConfig::from_vars`].
    pub fn from_env() -> Self {
        Self::new(JwtConfig::from_vars(|name| std::env::var(name).ok()))
    }
}

impl JwtConfig {
    /// Read `JWT_SECRET` (or the older `SECRET_KEY` deployments still set),
    /// `JWT_EXPIRATION_HOURS` and `JWT_ISSUER` through `var`, keeping the
    /// default for anything unset or unparsable.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let set = |name: &str| var(name).filter(|value| !value.is_empty());
        let secret = set("JWT_SECRET")
            .or_else(|| set("SECRET_KEY"))
            .unwrap_or(defaults.secret);

        if secret == DEFAULT_SECRET {
            let is_production = var("RUST_ENV").is_some_and(|v| v == "production" || v == "prod");
            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        Self {
            secret,
            expiration_hours: var("JWT_EXPIRATION_HOURS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.expiration_hours),
            issuer: var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }
}

impl TokenService for JwtTokenService {
    fn generate_token(&self, user_id: Uuid, email: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::hours(self.config.expiration_hours);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        let user_id = Uuid::parse_str(&token_data.claims.sub)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(TokenClaims {
            user_id,
            email: token_data.claims.email,
            exp: token_data.claims.exp,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        self.config.expiration_hours * 3600
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key".to_string(),
            expiration_hours: 1,
            issuer: "test-issuer".to_string(),
        }
    }

    #[test]
    fn test_token_round_trip_carries_identity() {
        let service = JwtTokenService::new(test_config());
        let user_id = Uuid::new_v4();

        let token = service.generate_token(user_id, "ada@lab.org").unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.email, "ada@lab.org");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_validate_invalid_token() {
        let service = JwtTokenService::new(test_config());

        let result = service.validate_token("invalid-token");

        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_validate_wrong_issuer_token() {
        let issuer1 = JwtTokenService::new(JwtConfig {
            issuer: "issuer1".to_string(),
            ..test_config()
        });
        let issuer2 = JwtTokenService::new(JwtConfig {
            issuer: "issuer2".to_string(),
            ..test_config()
        });

        let token = issuer1.generate_token(Uuid::new_v4(), "ada@lab.org").unwrap();

        assert!(issuer2.validate_token(&token).is_err());
    }

    #[test]
    fn test_validate_wrong_secret_token() {
        let signer = JwtTokenService::new(test_config());
        let verifier = JwtTokenService::new(JwtConfig {
            secret: "another-secret".to_string(),
            ..test_config()
        });

        let token = signer.generate_token(Uuid::new_v4(), "ada@lab.org").unwrap();

        assert!(matches!(
            verifier.validate_token(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_expired_token_is_reported_as_expired() {
        let service = JwtTokenService::new(JwtConfig {
            expiration_hours: -2,
            ..test_config()
        });

        let token = service.generate_token(Uuid::new_v4(), "ada@lab.org").unwrap();

        assert!(matches!(
            service.validate_token(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| pairs.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone())
    }

    #[test]
    fn test_legacy_secret_key_is_used_when_jwt_secret_is_unset() {
        let config = JwtConfig::from_vars(vars(&[("SECRET_KEY", "legacy-secret")]));
        assert_eq!(config.secret, "legacy-secret");

        let config = JwtConfig::from_vars(vars(&[
            ("JWT_SECRET", "current-secret"),
            ("SECRET_KEY", "legacy-secret"),
        ]));
        assert_eq!(config.secret, "current-secret");
    }

    #[test]
    fn test_tokens_signed_with_legacy_secret_validate() {
        let legacy = JwtTokenService::new(JwtConfig::from_vars(vars(&[(
            "SECRET_KEY",
            "legacy-secret",
        )])));
        let explicit = JwtTokenService::new(JwtConfig {
            secret: "legacy-secret".to_string(),
            ..JwtConfig::default()
        });

        let token = explicit.generate_token(Uuid::new_v4(), "ada@lab.org").unwrap();

        assert!(legacy.validate_token(&token).is_ok());
    }

    #[test]
    fn test_unset_or_invalid_vars_keep_defaults() {
        let config = JwtConfig::from_vars(vars(&[("JWT_EXPIRATION_HOURS", "soon")]));
        assert_eq!(config.secret, DEFAULT_SECRET);
        assert_eq!(config.expiration_hours, 168);
        assert_eq!(config.issuer, "staplab-api");

        let config = JwtConfig::from_vars(vars(&[
            ("JWT_EXPIRATION_HOURS", "12"),
            ("JWT_ISSUER", "lab-admin"),
        ]));
        assert_eq!(config.expiration_hours, 12);
        assert_eq!(config.issuer, "lab-admin");
    }

    #[test]
    fn test_default_lifetime_is_one_week() {
        let service = JwtTokenService::new(JwtConfig::default());
        assert_eq!(service.expiration_seconds(), 7 * 24 * 3600);
    }
}
