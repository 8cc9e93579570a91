use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::image_bearing::{ImageBearingStore, RequestImages};
use super::{media_id_for, revise_image, revise_paragraphs};
use crate::domain::{NewResearch, Research, ResearchFields, coalesce, present};
use crate::error::DomainError;
use crate::paragraphs::normalize_paragraphs;
use crate::ports::ResearchRepository;
use crate::reconcile::ImageReconciler;

const DUPLICATE_URL: &str = "A research entry with this url already exists";

/// Research entry operations. Same lifecycle as posts, with a single author
/// and a category.
pub struct ResearchService {
    store: ImageBearingStore<Research, dyn ResearchRepository>,
}

impl ResearchService {
    pub fn new(repo: Arc<dyn ResearchRepository>, images: ImageReconciler) -> Self {
        Self {
            store: ImageBearingStore::new(repo, images, DUPLICATE_URL),
        }
    }

    pub async fn create(&self, fields: ResearchFields) -> Result<Research, DomainError> {
        let request = RequestImages {
            image: fields.image.as_deref(),
            image_public_id: fields.image_public_id.as_deref(),
            paragraphs: fields.paragraphs.as_ref(),
        };
        self.store.create(request, new_research(&fields)).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Research, DomainError> {
        self.store.get(id).await
    }

    pub async fn list(&self) -> Result<Vec<Research>, DomainError> {
        self.store.list().await
    }

    pub async fn update(&self, id: Uuid, fields: ResearchFields) -> Result<Research, DomainError> {
        self.store
            .update(id, |existing| revise_research(existing, &fields))
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.store.delete(id).await
    }
}

fn new_research(fields: &ResearchFields) -> Result<Research, DomainError> {
    let (Some(title), Some(url), Some(image), Some(category), Some(content), Some(author)) = (
        present(&fields.title),
        present(&fields.url),
        present(&fields.image),
        present(&fields.category),
        present(&fields.content),
        present(&fields.author),
    ) else {
        return Err(DomainError::validation(
            "All fields are required. Make sure to upload an image.",
        ));
    };

    Ok(Research::new(NewResearch {
        title: title.to_owned(),
        url: url.to_owned(),
        image: image.to_owned(),
        image_public_id: media_id_for(image, &fields.image_public_id),
        category: category.to_owned(),
        content: content.to_owned(),
        author: author.to_owned(),
        paragraphs: normalize_paragraphs(fields.paragraphs.as_ref())?,
    }))
}

fn revise_research(existing: &Research, fields: &ResearchFields) -> Result<Research, DomainError> {
    let paragraphs = revise_paragraphs(fields.paragraphs.as_ref(), existing)?;
    let (image, image_public_id) = revise_image(
        &fields.image,
        &fields.image_public_id,
        &existing.image,
        &existing.image_public_id,
    );

    Ok(Research {
        title: coalesce(&fields.title, &existing.title),
        url: coalesce(&fields.url, &existing.url),
        image,
        image_public_id,
        category: coalesce(&fields.category, &existing.category),
        content: coalesce(&fields.content, &existing.content),
        author: coalesce(&fields.author, &existing.author),
        paragraphs,
        updated_at: Utc::now(),
        ..existing.clone()
    })
}
