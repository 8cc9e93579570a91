use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Record;
use crate::error::DomainError;

/// Membership status of a team member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamStatus {
    #[default]
    Current,
    Past,
    Future,
    Collaborator,
}

impl TeamStatus {
    pub const ALL: [TeamStatus; 4] = [
        TeamStatus::Current,
        TeamStatus::Past,
        TeamStatus::Future,
        TeamStatus::Collaborator,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TeamStatus::Current => "CURRENT",
            TeamStatus::Past => "PAST",
            TeamStatus::Future => "FUTURE",
            TeamStatus::Collaborator => "COLLABORATOR",
        }
    }
}

impl fmt::Display for TeamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TeamStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::validation("Invalid status value"))
    }
}

/// Team entity - a member (or former member, or collaborator) of the lab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub occupation: String,
    pub title: String,
    pub image: String,
    pub comment: String,
    pub affiliation: String,
    pub status: TeamStatus,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTeam {
    pub name: String,
    pub occupation: String,
    pub title: String,
    pub image: String,
    pub comment: String,
    pub affiliation: String,
    pub status: TeamStatus,
    pub socials: Socials,
}

/// Optional social profile links of a team member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Socials {
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

impl Team {
    pub fn new(fields: NewTeam) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: fields.name,
            occupation: fields.occupation,
            title: fields.title,
            image: fields.image,
            comment: fields.comment,
            affiliation: fields.affiliation,
            status: fields.status,
            twitter: fields.socials.twitter,
            facebook: fields.socials.facebook,
            linkedin: fields.socials.linkedin,
            instagram: fields.socials.instagram,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for Team {
    const KIND: &'static str = "Team member";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
