use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Paragraph, Record};
use crate::reconcile::ImageBearing;

/// Post entity - a blog post on the lab website.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub image: String,
    pub image_public_id: Option<String>,
    pub content: String,
    pub authors: Vec<String>,
    pub paragraphs: Vec<Paragraph>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields of a post about to be created.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub url: String,
    pub image: String,
    pub image_public_id: Option<String>,
    pub content: String,
    pub authors: Vec<String>,
    pub paragraphs: Vec<Paragraph>,
}

impl Post {
    /// Create a new post.
    pub fn new(fields: NewPost) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: fields.title,
            url: fields.url,
            image: fields.image,
            image_public_id: fields.image_public_id,
            content: fields.content,
            authors: fields.authors,
            paragraphs: fields.paragraphs,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for Post {
    const KIND: &'static str = "Post";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.url)
    }
}

impl ImageBearing for Post {
    fn image(&self) -> &str {
        &self.image
    }

    fn image_public_id(&self) -> Option<&str> {
        self.image_public_id.as_deref()
    }

    fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }
}
