//! Team entity for SeaORM.

use sea_orm::entity::prelude::*;

use staplab_core::domain::{Team, TeamStatus};
use staplab_core::error::RepoError;

use crate::database::postgres_base::Chronological;

/// The `team_status` PostgreSQL enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "team_status")]
pub enum Status {
    #[sea_orm(string_value = "CURRENT")]
    Current,
    #[sea_orm(string_value = "PAST")]
    Past,
    #[sea_orm(string_value = "FUTURE")]
    Future,
    #[sea_orm(string_value = "COLLABORATOR")]
    Collaborator,
}

impl From<Status> for TeamStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Current => TeamStatus::Current,
            Status::Past => TeamStatus::Past,
            Status::Future => TeamStatus::Future,
            Status::Collaborator => TeamStatus::Collaborator,
        }
    }
}

impl From<TeamStatus> for Status {
    fn from(status: TeamStatus) -> Self {
        match status {
            TeamStatus::Current => Status::Current,
            TeamStatus::Past => Status::Past,
            TeamStatus::Future => Status::Future,
            TeamStatus::Collaborator => Status::Collaborator,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub occupation: String,
    pub title: String,
    pub image: String,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    pub affiliation: String,
    pub status: Status,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Chronological for Entity {
    fn created_at_column() -> Column {
        Column::CreatedAt
    }
}

impl TryFrom<Model> for Team {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            name: model.name,
            occupation: model.occupation,
            title: model.title,
            image: model.image,
            comment: model.comment,
            affiliation: model.affiliation,
            status: model.status.into(),
            twitter: model.twitter,
            facebook: model.facebook,
            linkedin: model.linkedin,
            instagram: model.instagram,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}

impl TryFrom<Team> for Model {
    type Error = RepoError;

    fn try_from(team: Team) -> Result<Self, Self::Error> {
        Ok(Self {
            id: team.id,
            name: team.name,
            occupation: team.occupation,
            title: team.title,
            image: team.image,
            comment: team.comment,
            affiliation: team.affiliation,
            status: team.status.into(),
            twitter: team.twitter,
            facebook: team.facebook,
            linkedin: team.linkedin,
            instagram: team.instagram,
            created_at: team.created_at.into(),
            updated_at: team.updated_at.into(),
        })
    }
}
