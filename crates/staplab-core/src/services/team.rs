use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::{fetch, store_error};
use crate::domain::{NewTeam, Record, Socials, Team, TeamFields, TeamStatus, coalesce, coalesce_opt, present};
use crate::error::DomainError;
use crate::ports::TeamRepository;

const DUPLICATE: &str = "Team member already exists";

/// Team member operations. Team images are plain URLs and are not managed on
/// the media host.
pub struct TeamService {
    repo: Arc<dyn TeamRepository>,
}

impl TeamService {
    pub fn new(repo: Arc<dyn TeamRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, fields: TeamFields) -> Result<Team, DomainError> {
        let (
            Some(name),
            Some(occupation),
            Some(title),
            Some(image),
            Some(comment),
            Some(affiliation),
        ) = (
            present(&fields.name),
            present(&fields.occupation),
            present(&fields.title),
            present(&fields.image),
            present(&fields.comment),
            present(&fields.affiliation),
        )
        else {
            return Err(DomainError::validation("All fields are required"));
        };
        let status = match present(&fields.status) {
            Some(status) => status.parse()?,
            None => TeamStatus::default(),
        };

        let team = Team::new(NewTeam {
            name: name.to_owned(),
            occupation: occupation.to_owned(),
            title: title.to_owned(),
            image: image.to_owned(),
            comment: comment.to_owned(),
            affiliation: affiliation.to_owned(),
            status,
            socials: Socials {
                twitter: present(&fields.twitter).map(str::to_owned),
                facebook: present(&fields.facebook).map(str::to_owned),
                linkedin: present(&fields.linkedin).map(str::to_owned),
                instagram: present(&fields.instagram).map(str::to_owned),
            },
        });
        let id = team.id;
        let saved = self
            .repo
            .insert(team)
            .await
            .map_err(|e| store_error(e, Team::KIND, id, DUPLICATE))?;

        tracing::info!(team_id = %saved.id, status = %saved.status, "Team member created");
        Ok(saved)
    }

    pub async fn get(&self, id: Uuid) -> Result<Team, DomainError> {
        fetch(&*self.repo, id).await
    }

    pub async fn list(&self) -> Result<Vec<Team>, DomainError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn update(&self, id: Uuid, fields: TeamFields) -> Result<Team, DomainError> {
        let existing: Team = fetch(&*self.repo, id).await?;
        let status = match present(&fields.status) {
            Some(status) => status.parse()?,
            None => existing.status,
        };

        let revised = Team {
            name: coalesce(&fields.name, &existing.name),
            occupation: coalesce(&fields.occupation, &existing.occupation),
            title: coalesce(&fields.title, &existing.title),
            image: coalesce(&fields.image, &existing.image),
            comment: coalesce(&fields.comment, &existing.comment),
            affiliation: coalesce(&fields.affiliation, &existing.affiliation),
            status,
            twitter: coalesce_opt(&fields.twitter, &existing.twitter),
            facebook: coalesce_opt(&fields.facebook, &existing.facebook),
            linkedin: coalesce_opt(&fields.linkedin, &existing.linkedin),
            instagram: coalesce_opt(&fields.instagram, &existing.instagram),
            updated_at: Utc::now(),
            ..existing
        };
        let saved = self
            .repo
            .update(revised)
            .await
            .map_err(|e| store_error(e, Team::KIND, id, DUPLICATE))?;

        tracing::info!(team_id = %id, "Team member updated");
        Ok(saved)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        fetch::<Team, _>(&*self.repo, id).await?;
        self.repo
            .delete(id)
            .await
            .map_err(|e| store_error(e, Team::KIND, id, DUPLICATE))?;
        tracing::info!(team_id = %id, "Team member deleted");
        Ok(())
    }
}
