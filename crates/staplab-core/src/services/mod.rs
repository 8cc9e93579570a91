//! Entity services: validation, normalization, persistence and image
//! reconciliation for each resource the API exposes.

mod image_bearing;
mod post;
mod research;
mod team;
mod user;

pub use post::PostService;
pub use research::ResearchService;
pub use team::TeamService;
pub use user::UserService;

use std::collections::HashMap;

use serde_json::Value;
use uuid::Uuid;

use crate::domain::{Paragraph, Record, present};
use crate::error::{DomainError, RepoError};
use crate::media::public_id_from_url;
use crate::paragraphs::{is_blank, normalize_paragraphs_with};
use crate::ports::BaseRepository;
use crate::reconcile::ImageBearing;

/// Fetch a record or fail with `NotFound`.
async fn fetch<T, R>(repo: &R, id: Uuid) -> Result<T, DomainError>
where
    T: Record,
    R: BaseRepository<T, Uuid> + ?Sized,
{
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(T::KIND, id))
}

/// Map a store error for `id`, turning a vanished row into `NotFound` and
/// a unique-key clash into `Duplicate(duplicate)`.
fn store_error(err: RepoError, kind: &'static str, id: Uuid, duplicate: &str) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::not_found(kind, id),
        RepoError::Constraint(_) => DomainError::Duplicate(duplicate.to_owned()),
        other => other.into(),
    }
}

/// The identifier to store for `image`: the explicit one, else one derived
/// from the URL.
fn media_id_for(image: &str, explicit: &Option<String>) -> Option<String> {
    present(explicit)
        .map(str::to_owned)
        .or_else(|| public_id_from_url(image))
}

/// Image and identifier after an update. The identifier only moves when the
/// image does, so the stored pair stays consistent.
fn revise_image(
    image: &Option<String>,
    explicit_id: &Option<String>,
    current_image: &str,
    current_id: &Option<String>,
) -> (String, Option<String>) {
    match present(image) {
        Some(new_image) if new_image != current_image => {
            (new_image.to_owned(), media_id_for(new_image, explicit_id))
        }
        _ => (current_image.to_owned(), current_id.clone()),
    }
}

/// Paragraphs after an update: blank input keeps the stored list.
///
/// Clients never see identifiers, so an image the record already owns is
/// matched by URL and keeps its stored identifier.
fn revise_paragraphs(
    raw: Option<&Value>,
    current: &impl ImageBearing,
) -> Result<Vec<Paragraph>, DomainError> {
    if is_blank(raw) {
        return Ok(current.paragraphs().to_vec());
    }

    let mut known: HashMap<&str, String> = HashMap::new();
    if let Some(id) = current.image_public_id().filter(|id| !id.is_empty()) {
        known.insert(current.image(), id.to_owned());
    }
    for paragraph in current.paragraphs() {
        if let (Some(image), Some(id)) = (paragraph.image.as_deref(), paragraph.media_id()) {
            known.insert(image, id);
        }
    }
    normalize_paragraphs_with(raw, |image| known.get(image).cloned())
}

#[cfg(test)]
pub(crate) mod testing;
