//! Media reference codec: recovers a hosted asset's identifier from its URL.
//!
//! Delivery URLs look like
//! `https://res.cloudinary.com/<cloud>/image/upload/<transforms>/v<version>/<identifier>.<ext>`.
//! The identifier is everything between the first `/v<digits>/` segment and
//! the last `.`, folders included.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static VERSIONED_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/v[0-9]+/(.+)\.").expect("media path pattern is valid"));

/// Identifier of the asset behind `url`, or `None` when the URL does not follow
/// the host's versioned path convention.
pub fn public_id_from_url(url: &str) -> Option<String> {
    VERSIONED_PATH
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}

/// Like [`public_id_from_url`], for untyped request input. Anything other than
/// a string yields `None`.
pub fn public_id_from_value(value: &Value) -> Option<String> {
    value.as_str().and_then(public_id_from_url)
}
