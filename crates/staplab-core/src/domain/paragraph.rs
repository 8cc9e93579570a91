use serde::{Deserialize, Serialize};

use crate::media::public_id_from_url;

/// A text block embedded in a post or research entry, optionally illustrated.
///
/// Paragraphs live inside their owner's JSON column rather than in a table of
/// their own, so this type is also the storage format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_public_id: Option<String>,
}

impl Paragraph {
    /// Identifier of this paragraph's hosted image: the stored one, or one
    /// derived from the image URL.
    pub fn media_id(&self) -> Option<String> {
        self.image_public_id
            .clone()
            .filter(|id| !id.is_empty())
            .or_else(|| self.image.as_deref().and_then(public_id_from_url))
    }
}
