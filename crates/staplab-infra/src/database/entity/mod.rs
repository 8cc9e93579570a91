//! SeaORM entity definitions.

pub mod post;
pub mod research;
pub mod team;
pub mod user;

use serde::Serialize;
use serde::de::DeserializeOwned;

use staplab_core::error::RepoError;

/// Decode a JSON column into its domain type.
pub(crate) fn from_json<T: DeserializeOwned>(column: &str, value: Json) -> Result<T, RepoError> {
    serde_json::from_value(value).map_err(|e| RepoError::Decode(format!("{column}: {e}")))
}

/// Encode a domain value for a JSON column.
pub(crate) fn to_json<T: Serialize>(column: &str, value: &T) -> Result<Json, RepoError> {
    serde_json::to_value(value).map_err(|e| RepoError::Decode(format!("{column}: {e}")))
}

type Json = serde_json::Value;
