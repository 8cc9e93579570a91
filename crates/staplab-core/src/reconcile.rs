//! Image lifecycle reconciliation.
//!
//! The media host owns the image binaries; the store only keeps references.
//! Whenever a record that owns hosted images is created unsuccessfully,
//! updated or deleted, the reconciler works out which identifiers are no
//! longer referenced and asks the host to delete them. Deletions are best
//! effort: each one is attempted once, failures are logged and never change
//! the outcome of the request that triggered them.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::Paragraph;
use crate::media::public_id_from_url;
use crate::paragraphs::normalize_paragraphs;
use crate::ports::{MediaHost, UploadedImage};

/// A record with one top-level image and a list of optionally illustrated
/// paragraphs.
pub trait ImageBearing {
    fn image(&self) -> &str;

    fn image_public_id(&self) -> Option<&str>;

    fn paragraphs(&self) -> &[Paragraph];

    /// Every media identifier the record owns, top-level first, without
    /// duplicates.
    fn media_ids(&self) -> Vec<String> {
        let top = self
            .image_public_id()
            .filter(|id| !id.is_empty())
            .map(str::to_owned)
            .or_else(|| public_id_from_url(self.image()));
        distinct(top.into_iter().chain(self.paragraphs().iter().filter_map(Paragraph::media_id)))
    }
}

/// Identifiers owned by `before` that `after` no longer references.
pub fn stale_media_ids(before: &impl ImageBearing, after: &impl ImageBearing) -> Vec<String> {
    let kept: HashSet<String> = after.media_ids().into_iter().collect();
    before
        .media_ids()
        .into_iter()
        .filter(|id| !kept.contains(id))
        .collect()
}

/// Identifiers referenced by a raw create request.
///
/// Paragraphs are re-normalized from the raw input; when that fails no
/// paragraph identifier is reported.
pub fn creation_leftovers(
    image: Option<&str>,
    image_public_id: Option<&str>,
    raw_paragraphs: Option<&Value>,
) -> Vec<String> {
    let top = image_public_id
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .or_else(|| image.and_then(public_id_from_url));
    let paragraph_ids = normalize_paragraphs(raw_paragraphs)
        .map(|paragraphs| paragraphs.iter().filter_map(Paragraph::media_id).collect())
        .unwrap_or_else(|_| Vec::new());
    distinct(top.into_iter().chain(paragraph_ids))
}

/// Outcome of a batch of deletions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeReport {
    pub attempted: usize,
    pub failed: usize,
}

/// Issues media deletions on behalf of the entity services.
#[derive(Clone)]
pub struct ImageReconciler {
    media: Arc<dyn MediaHost>,
}

impl ImageReconciler {
    pub fn new(media: Arc<dyn MediaHost>) -> Self {
        Self { media }
    }

    /// Undo the uploads referenced by a create request that failed.
    pub async fn on_create_failure(
        &self,
        image: Option<&str>,
        image_public_id: Option<&str>,
        raw_paragraphs: Option<&Value>,
    ) -> PurgeReport {
        let ids = creation_leftovers(image, image_public_id, raw_paragraphs);
        self.purge("create-failure", ids).await
    }

    /// Delete what `before` owned and the committed `after` dropped.
    pub async fn on_update<E: ImageBearing>(&self, before: &E, after: &E) -> PurgeReport {
        self.purge("update", stale_media_ids(before, after)).await
    }

    /// Delete everything `entity` owns. Call before removing the row.
    pub async fn on_delete<E: ImageBearing>(&self, entity: &E) -> PurgeReport {
        self.purge("delete", entity.media_ids()).await
    }

    /// Delete an image uploaded for a request that did not go through.
    pub async fn discard_upload(&self, upload: &UploadedImage) -> PurgeReport {
        self.purge("discarded-upload", vec![upload.public_id.clone()]).await
    }

    async fn purge(&self, reason: &'static str, ids: Vec<String>) -> PurgeReport {
        let mut report = PurgeReport::default();
        for public_id in ids {
            report.attempted += 1;
            match self.media.destroy(&public_id).await {
                Ok(()) => tracing::debug!(%public_id, reason, "Deleted hosted image"),
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(%public_id, reason, error = %e, "Failed to delete hosted image");
                }
            }
        }
        report
    }
}

/// First-seen order, duplicates dropped.
fn distinct(ids: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{RecordingHost, hosted};
    use serde_json::json;

    struct Entry {
        image: String,
        image_public_id: Option<String>,
        paragraphs: Vec<Paragraph>,
    }

    impl ImageBearing for Entry {
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

    fn illustrated(name: &str) -> Paragraph {
        Paragraph {
            content: format!("about {name}"),
            image: Some(hosted(name)),
            image_public_id: Some(format!("lab/{name}")),
            ..Paragraph::default()
        }
    }

    fn entry(top: &str, paragraphs: &[&str]) -> Entry {
        Entry {
            image: hosted(top),
            image_public_id: Some(format!("lab/{top}")),
            paragraphs: paragraphs.iter().map(|name| illustrated(name)).collect(),
        }
    }

    fn reconciler(fail: bool) -> (ImageReconciler, Arc<RecordingHost>) {
        let host = Arc::new(if fail {
            RecordingHost::failing()
        } else {
            RecordingHost::default()
        });
        (ImageReconciler::new(host.clone()), host)
    }

    #[test]
    fn test_media_ids_cover_top_and_paragraphs() {
        let e = entry("cover", &["a", "b"]);
        assert_eq!(e.media_ids(), ["lab/cover", "lab/a", "lab/b"]);
    }

    #[test]
    fn test_media_ids_derive_missing_top_level_id() {
        let mut e = entry("cover", &[]);
        e.image_public_id = None;
        assert_eq!(e.media_ids(), ["lab/cover"]);
    }

    #[test]
    fn test_media_ids_are_distinct() {
        let e = entry("a", &["a", "b", "b"]);
        assert_eq!(e.media_ids(), ["lab/a", "lab/b"]);
    }

    #[test]
    fn test_replacing_paragraphs_marks_only_dropped_images() {
        let before = entry("cover", &["a", "b"]);
        let after = entry("cover", &["b", "c"]);
        assert_eq!(stale_media_ids(&before, &after), ["lab/a"]);
    }

    #[test]
    fn test_replacing_top_image_marks_old_one() {
        let before = entry("old", &["a"]);
        let after = entry("new", &["a"]);
        assert_eq!(stale_media_ids(&before, &after), ["lab/old"]);
    }

    #[test]
    fn test_image_moved_into_a_paragraph_is_retained() {
        let before = entry("old", &[]);
        let after = entry("new", &["old"]);
        assert!(stale_media_ids(&before, &after).is_empty());
    }

    #[test]
    fn test_unchanged_entity_has_nothing_stale() {
        let before = entry("cover", &["a"]);
        let after = entry("cover", &["a"]);
        assert!(stale_media_ids(&before, &after).is_empty());
    }

    #[test]
    fn test_creation_leftovers_use_explicit_then_derived_ids() {
        let paragraphs = json!([{"content": "x", "image": hosted("p1")}]);
        let ids = creation_leftovers(Some(hosted("top").as_str()), Some("uploaded/top"), Some(&paragraphs));
        assert_eq!(ids, ["uploaded/top", "lab/p1"]);

        let ids = creation_leftovers(Some(hosted("top").as_str()), None, None);
        assert_eq!(ids, ["lab/top"]);
    }

    #[test]
    fn test_creation_leftovers_skip_paragraphs_that_fail_to_normalize() {
        let broken = json!(format!(r#"[{{"image":"{}"}}, null]"#, hosted("p1")));
        let ids = creation_leftovers(Some(hosted("top").as_str()), None, Some(&broken));
        assert_eq!(ids, ["lab/top"]);
    }

    #[tokio::test]
    async fn test_delete_attempts_every_owned_image() {
        let (reconciler, host) = reconciler(false);
        let e = entry("cover", &["a", "b", "c"]);

        let report = reconciler.on_delete(&e).await;

        assert_eq!(report, PurgeReport { attempted: 4, failed: 0 });
        assert_eq!(
            host.destroyed(),
            ["lab/cover", "lab/a", "lab/b", "lab/c"]
        );
    }

    #[tokio::test]
    async fn test_failed_deletions_are_counted_not_raised() {
        let (reconciler, host) = reconciler(true);
        let e = entry("cover", &["a"]);

        let report = reconciler.on_delete(&e).await;

        assert_eq!(report, PurgeReport { attempted: 2, failed: 2 });
        assert_eq!(host.destroyed().len(), 2);
    }

    #[tokio::test]
    async fn test_update_deletes_only_stale_ids() {
        let (reconciler, host) = reconciler(false);
        let before = entry("cover", &["a", "b"]);
        let after = entry("cover", &["b", "c"]);

        let report = reconciler.on_update(&before, &after).await;

        assert_eq!(report.attempted, 1);
        assert_eq!(host.destroyed(), ["lab/a"]);
    }

    #[tokio::test]
    async fn test_create_failure_cleans_up_input_images() {
        let (reconciler, host) = reconciler(false);
        let paragraphs = json!([{"content": "x", "image": hosted("p1")}, {"content": "y"}]);

        reconciler
            .on_create_failure(Some(hosted("top").as_str()), None, Some(&paragraphs))
            .await;

        assert_eq!(host.destroyed(), ["lab/top", "lab/p1"]);
    }
}
