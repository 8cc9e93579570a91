//! Raw request fields accepted by the entity services.
//!
//! Every field is optional: the same shape carries a create request (where the
//! services enforce the required set) and a partial update (where missing or
//! empty values fall back to what is stored). `authors` and `paragraphs` stay
//! untyped until normalization because multipart forms deliver them as JSON
//! encoded strings.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostFields {
    pub title: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub image_public_id: Option<String>,
    pub content: Option<String>,
    pub authors: Option<Value>,
    pub paragraphs: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchFields {
    pub title: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub image_public_id: Option<String>,
    pub category: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub paragraphs: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamFields {
    pub name: Option<String>,
    pub occupation: Option<String>,
    pub title: Option<String>,
    pub image: Option<String>,
    pub comment: Option<String>,
    pub affiliation: Option<String>,
    pub status: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFields {
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A supplied, non-empty value.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// The supplied value, or the current one when the supplied value is missing
/// or empty. An update can therefore never clear a field.
pub(crate) fn coalesce(value: &Option<String>, current: &str) -> String {
    present(value).unwrap_or(current).to_owned()
}

pub(crate) fn coalesce_opt(value: &Option<String>, current: &Option<String>) -> Option<String> {
    present(value).map(str::to_owned).or_else(|| current.clone())
}
