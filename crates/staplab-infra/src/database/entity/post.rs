//! Post entity for SeaORM.

use sea_orm::entity::prelude::*;

use staplab_core::domain::Post;
use staplab_core::error::RepoError;

use super::{from_json, to_json};
use crate::database::postgres_base::Chronological;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub url: String,
    pub image: String,
    pub image_public_id: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub authors: Json,
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

impl TryFrom<Model> for Post {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            title: model.title,
            url: model.url,
            image: model.image,
            image_public_id: model.image_public_id,
            content: model.content,
            authors: from_json("authors", model.authors)?,
            paragraphs: from_json("paragraphs", model.paragraphs)?,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}

impl TryFrom<Post> for Model {
    type Error = RepoError;

    fn try_from(post: Post) -> Result<Self, Self::Error> {
        Ok(Self {
            id: post.id,
            authors: to_json("authors", &post.authors)?,
            paragraphs: to_json("paragraphs", &post.paragraphs)?,
            title: post.title,
            url: post.url,
            image: post.image,
            image_public_id: post.image_public_id,
            content: post.content,
            created_at: post.created_at.into(),
            updated_at: post.updated_at.into(),
        })
    }
}
