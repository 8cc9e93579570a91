//! Media host port - abstraction over the service storing image binaries.

use async_trait::async_trait;

/// An image received from a client, ready to be sent to the media host.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// What the media host returns for a stored image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Public delivery URL.
    pub url: String,
    /// Opaque identifier used to delete the asset later.
    pub public_id: String,
}

/// Media host trait - Cloudinary in production, in-memory otherwise.
#[async_trait]
pub trait MediaHost: Send + Sync {
    /// Store an image and return its URL and identifier.
    async fn upload(&self, image: ImageUpload) -> Result<UploadedImage, MediaError>;

    /// Delete the asset with the given identifier.
    async fn destroy(&self, public_id: &str) -> Result<(), MediaError>;
}

/// Media host errors.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Image rejected: {0}")]
    Rejected(String),

    #[error("Media host unreachable: {0}")]
    Transport(String),

    #[error("Media host returned {status}: {message}")]
    Api { status: u16, message: String },
}
