use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::image_bearing::{ImageBearingStore, RequestImages};
use super::{media_id_for, revise_image, revise_paragraphs};
use crate::domain::{NewPost, Post, PostFields, coalesce, present};
use crate::error::DomainError;
use crate::paragraphs::{normalize_authors, normalize_paragraphs};
use crate::ports::PostRepository;
use crate::reconcile::ImageReconciler;

const DUPLICATE_URL: &str = "A post with this url already exists";

/// Blog post operations.
pub struct PostService {
    store: ImageBearingStore<Post, dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>, images: ImageReconciler) -> Self {
        Self {
            store: ImageBearingStore::new(repo, images, DUPLICATE_URL),
        }
    }

    /// Create a post. If anything fails, images the request referenced are
    /// deleted from the media host before the error is returned.
    pub async fn create(&self, fields: PostFields) -> Result<Post, DomainError> {
        let request = RequestImages {
            image: fields.image.as_deref(),
            image_public_id: fields.image_public_id.as_deref(),
            paragraphs: fields.paragraphs.as_ref(),
        };
        self.store.create(request, new_post(&fields)).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Post, DomainError> {
        self.store.get(id).await
    }

    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        self.store.list().await
    }

    /// Partially update a post; see [`crate::domain::PostFields`] for the
    /// coalescing rules. Images the update stops referencing are deleted once
    /// the new version is stored.
    pub async fn update(&self, id: Uuid, fields: PostFields) -> Result<Post, DomainError> {
        self.store
            .update(id, |existing| revise_post(existing, &fields))
            .await
    }

    /// Delete a post and every image it owns.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.store.delete(id).await
    }
}

fn new_post(fields: &PostFields) -> Result<Post, DomainError> {
    let authors = normalize_authors(fields.authors.as_ref())?;
    let (Some(title), Some(url), Some(image), Some(content), Some(authors)) = (
        present(&fields.title),
        present(&fields.url),
        present(&fields.image),
        present(&fields.content),
        authors,
    ) else {
        return Err(DomainError::validation(
            "All fields are required, and authors must be an array. Make sure to upload an image.",
        ));
    };

    Ok(Post::new(NewPost {
        title: title.to_owned(),
        url: url.to_owned(),
        image: image.to_owned(),
        image_public_id: media_id_for(image, &fields.image_public_id),
        content: content.to_owned(),
        authors,
        paragraphs: normalize_paragraphs(fields.paragraphs.as_ref())?,
    }))
}

fn revise_post(existing: &Post, fields: &PostFields) -> Result<Post, DomainError> {
    let authors =
        normalize_authors(fields.authors.as_ref())?.unwrap_or_else(|| existing.authors.clone());
    let paragraphs = revise_paragraphs(fields.paragraphs.as_ref(), existing)?;
    let (image, image_public_id) = revise_image(
        &fields.image,
        &fields.image_public_id,
        &existing.image,
        &existing.image_public_id,
    );

    Ok(Post {
        title: coalesce(&fields.title, &existing.title),
        url: coalesce(&fields.url, &existing.url),
        image,
        image_public_id,
        content: coalesce(&fields.content, &existing.content),
        authors,
        paragraphs,
        updated_at: Utc::now(),
        ..existing.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{MemoryRepo, RecordingHost, hosted};
    use serde_json::json;

    fn service(host: Arc<RecordingHost>) -> (PostService, Arc<MemoryRepo<Post>>) {
        let repo = Arc::new(MemoryRepo::<Post>::default());
        (
            PostService::new(repo.clone(), ImageReconciler::new(host)),
            repo,
        )
    }

    fn fields() -> PostFields {
        PostFields {
            title: Some("Sensing with light".into()),
            url: Some("sensing-with-light".into()),
            image: Some(hosted("cover")),
            image_public_id: None,
            content: Some("Body".into()),
            authors: Some(json!(["Ada", "Grace"])),
            paragraphs: Some(json!([
                {"content": "one", "image": hosted("a")},
                {"content": "two", "image": hosted("b")},
            ])),
        }
    }

    #[tokio::test]
    async fn test_create_derives_identifiers() {
        let host = Arc::new(RecordingHost::default());
        let (service, _) = service(host.clone());

        let post = service.create(fields()).await.unwrap();

        assert_eq!(post.image_public_id.as_deref(), Some("lab/cover"));
        assert_eq!(post.paragraphs[1].image_public_id.as_deref(), Some("lab/b"));
        assert_eq!(post.authors, ["Ada", "Grace"]);
        assert!(host.destroyed().is_empty());
    }

    #[tokio::test]
    async fn test_create_missing_field_cleans_up_uploads() {
        let host = Arc::new(RecordingHost::default());
        let (service, repo) = service(host.clone());

        let err = service
            .create(PostFields {
                content: None,
                image_public_id: Some("uploaded/cover".into()),
                ..fields()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(host.destroyed(), ["uploaded/cover", "lab/a", "lab/b"]);
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_create_duplicate_url_is_reported_and_cleaned() {
        let host = Arc::new(RecordingHost::default());
        let (service, _) = service(host.clone());
        service.create(fields()).await.unwrap();

        let err = service.create(fields()).await.unwrap_err();

        assert!(matches!(err, DomainError::Duplicate(_)));
        assert_eq!(host.destroyed(), ["lab/cover", "lab/a", "lab/b"]);
    }

    #[tokio::test]
    async fn test_update_with_empty_fields_changes_nothing() {
        let host = Arc::new(RecordingHost::default());
        let (service, _) = service(host.clone());
        let post = service.create(fields()).await.unwrap();

        let updated = service
            .update(
                post.id,
                PostFields {
                    title: Some(String::new()),
                    paragraphs: Some(json!("")),
                    ..PostFields::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, post.title);
        assert_eq!(updated.paragraphs, post.paragraphs);
        assert_eq!(updated.image_public_id, post.image_public_id);
        assert!(host.destroyed().is_empty());
    }

    #[tokio::test]
    async fn test_update_paragraphs_deletes_only_dropped_image() {
        let host = Arc::new(RecordingHost::default());
        let (service, _) = service(host.clone());
        let post = service.create(fields()).await.unwrap();

        let updated = service
            .update(
                post.id,
                PostFields {
                    paragraphs: Some(json!([
                        {"content": "two", "image": hosted("b"), "imagePublicId": "lab/b"},
                        {"content": "three", "image": hosted("c")},
                    ])),
                    ..PostFields::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(host.destroyed(), ["lab/a"]);
        assert_eq!(updated.paragraphs[1].image_public_id.as_deref(), Some("lab/c"));
    }

    #[tokio::test]
    async fn test_resent_paragraph_keeps_its_stored_identifier() {
        const FIGURE: &str = "https://cdn.example.org/figures/fig1.png";
        let host = Arc::new(RecordingHost::default());
        let (service, repo) = service(host.clone());
        let post = service
            .create(PostFields {
                paragraphs: Some(json!([
                    {"content": "p", "image": FIGURE, "imagePublicId": "lab/fig1"},
                ])),
                ..fields()
            })
            .await
            .unwrap();

        service
            .update(
                post.id,
                PostFields {
                    paragraphs: Some(json!([{"content": "p edited", "image": FIGURE}])),
                    ..PostFields::default()
                },
            )
            .await
            .unwrap();

        assert!(host.destroyed().is_empty());
        let stored = repo.get(post.id).unwrap();
        assert_eq!(stored.paragraphs[0].content, "p edited");
        assert_eq!(stored.paragraphs[0].image_public_id.as_deref(), Some("lab/fig1"));
    }

    #[tokio::test]
    async fn test_update_new_cover_deletes_old_after_commit() {
        let host = Arc::new(RecordingHost::default());
        let (service, repo) = service(host.clone());
        let post = service.create(fields()).await.unwrap();

        let updated = service
            .update(
                post.id,
                PostFields {
                    image: Some(hosted("cover-2")),
                    ..PostFields::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.image_public_id.as_deref(), Some("lab/cover-2"));
        assert_eq!(host.destroyed(), ["lab/cover"]);
        assert_eq!(repo.get(post.id).unwrap().image, hosted("cover-2"));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let (service, _) = service(Arc::new(RecordingHost::default()));
        let err = service
            .update(Uuid::new_v4(), PostFields::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity_type: "Post", .. }));
    }

    #[tokio::test]
    async fn test_delete_removes_row_even_when_host_is_down() {
        let host = Arc::new(RecordingHost::failing());
        let (service, repo) = service(host.clone());
        let post = service.create(fields()).await.unwrap();

        service.delete(post.id).await.unwrap();

        assert_eq!(host.destroyed(), ["lab/cover", "lab/a", "lab/b"]);
        assert!(repo.is_empty());
        assert!(matches!(
            service.get(post.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
