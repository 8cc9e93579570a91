//! Lifecycle shared by records that own hosted images (posts, research).

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use super::{fetch, store_error};
use crate::domain::Record;
use crate::error::DomainError;
use crate::ports::BaseRepository;
use crate::reconcile::{ImageBearing, ImageReconciler};

/// Image references of a create request, deleted again if the create fails.
#[derive(Clone, Copy, Default)]
pub(super) struct RequestImages<'a> {
    pub image: Option<&'a str>,
    pub image_public_id: Option<&'a str>,
    pub paragraphs: Option<&'a Value>,
}

/// Persistence plus image reconciliation for one image-bearing record type.
pub(super) struct ImageBearingStore<T, R: ?Sized> {
    repo: Arc<R>,
    images: ImageReconciler,
    duplicate: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<T, R> ImageBearingStore<T, R>
where
    T: Record + ImageBearing,
    R: BaseRepository<T, Uuid> + ?Sized,
{
    /// `duplicate` is the message reported when the unique key clashes.
    pub fn new(repo: Arc<R>, images: ImageReconciler, duplicate: &'static str) -> Self {
        Self {
            repo,
            images,
            duplicate,
            _record: PhantomData,
        }
    }

    /// Store `record`. If it failed validation or the insert fails, every
    /// image `request` referenced is deleted before the error is returned.
    pub async fn create(
        &self,
        request: RequestImages<'_>,
        record: Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let result = match record {
            Ok(record) => {
                let id = record.id();
                self.repo
                    .insert(record)
                    .await
                    .map_err(|e| store_error(e, T::KIND, id, self.duplicate))
            }
            Err(e) => Err(e),
        };

        match &result {
            Ok(saved) => tracing::info!(entity = T::KIND, id = %saved.id(), "Record created"),
            Err(e) => {
                let report = self
                    .images
                    .on_create_failure(request.image, request.image_public_id, request.paragraphs)
                    .await;
                tracing::debug!(
                    entity = T::KIND,
                    error = %e,
                    images = report.attempted,
                    "Create failed, request images purged"
                );
            }
        }
        result
    }

    pub async fn get(&self, id: Uuid) -> Result<T, DomainError> {
        fetch(&*self.repo, id).await
    }

    pub async fn list(&self) -> Result<Vec<T>, DomainError> {
        Ok(self.repo.find_all().await?)
    }

    /// Replace the stored record with `revise(existing)`. Images the new
    /// version stops referencing are deleted once it is committed.
    pub async fn update(
        &self,
        id: Uuid,
        revise: impl FnOnce(&T) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let existing: T = fetch(&*self.repo, id).await?;
        let revised = revise(&existing)?;
        let saved = self
            .repo
            .update(revised)
            .await
            .map_err(|e| store_error(e, T::KIND, id, self.duplicate))?;

        let report = self.images.on_update(&existing, &saved).await;
        tracing::info!(entity = T::KIND, %id, stale_images = report.attempted, "Record updated");
        Ok(saved)
    }

    /// Delete every image the record owns, then the row. Media host failures
    /// are logged and do not keep the row alive.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let existing: T = fetch(&*self.repo, id).await?;
        let report = self.images.on_delete(&existing).await;
        self.repo
            .delete(id)
            .await
            .map_err(|e| store_error(e, T::KIND, id, self.duplicate))?;

        tracing::info!(
            entity = T::KIND,
            %id,
            images = report.attempted,
            image_failures = report.failed,
            "Record deleted"
        );
        Ok(())
    }
}
