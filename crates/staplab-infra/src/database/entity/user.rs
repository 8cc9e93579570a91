//! User entity for SeaORM.

use sea_orm::entity::prelude::*;

use staplab_core::domain::User;
use staplab_core::error::RepoError;

use crate::database::postgres_base::Chronological;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub fullname: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
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

impl TryFrom<Model> for User {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            fullname: model.fullname,
            email: model.email,
            password_hash: model.password_hash,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}

impl TryFrom<User> for Model {
    type Error = RepoError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: user.id,
            fullname: user.fullname,
            email: user.email,
            password_hash: user.password_hash,
            created_at: user.created_at.into(),
            updated_at: user.updated_at.into(),
        })
    }
}
