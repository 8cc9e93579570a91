//! Research entity for SeaORM.

use sea_orm::entity::prelude::*;

use staplab_core::domain::Research;
use staplab_core::error::RepoError;

use super::{from_json, to_json};
use crate::database::postgres_base::Chronological;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "research")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub url: String,
    pub image: String,
    pub image_public_id: Option<String>,
    pub category: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub author: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub paragraphs: Json,
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

impl TryFrom<Model> for Research {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            title: model.title,
            url: model.url,
            image: model.image,
            image_public_id: model.image_public_id,
            category: model.category,
            content: model.content,
            author: model.author,
            paragraphs: from_json("paragraphs", model.paragraphs)?,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}

impl TryFrom<Research> for Model {
    type Error = RepoError;

    fn try_from(research: Research) -> Result<Self, Self::Error> {
        Ok(Self {
            id: research.id,
            paragraphs: to_json("paragraphs", &research.paragraphs)?,
            title: research.title,
            url: research.url,
            image: research.image,
            image_public_id: research.image_public_id,
            category: research.category,
            content: research.content,
            author: research.author,
            created_at: research.created_at.into(),
            updated_at: research.updated_at.into(),
        })
    }
}
