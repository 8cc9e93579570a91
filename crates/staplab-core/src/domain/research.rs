use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Paragraph, Record};
use crate::reconcile::ImageBearing;

/// Research entity - a research entry published by the lab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Research {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub image: String,
    pub image_public_id: Option<String>,
    pub category: String,
    pub content: String,
    pub author: String,
    pub paragraphs: Vec<Paragraph>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewResearch {
    pub title: String,
    pub url: String,
    pub image: String,
    pub image_public_id: Option<String>,
    pub category: String,
    pub content: String,
    pub author: String,
    pub paragraphs: Vec<Paragraph>,
}

impl Research {
    pub fn new(fields: NewResearch) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: fields.title,
            url: fields.url,
            image: fields.image,
            image_public_id: fields.image_public_id,
            category: fields.category,
            content: fields.content,
            author: fields.author,
            paragraphs: fields.paragraphs,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for Research {
    const KIND: &'static str = "Research";

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

impl ImageBearing for Research {
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
