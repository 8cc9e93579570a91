use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use staplab_core::ports::{ImageUpload, MediaError, MediaHost, UploadedImage};

/// Media host that keeps nothing but a ledger of what it was asked to do.
///
/// Used when no Cloudinary credentials are configured, and by tests to
/// observe deletions.
#[derive(Default)]
pub struct InMemoryMediaHost {
    stored: RwLock<Vec<String>>,
    destroyed: RwLock<Vec<String>>,
    next_id: AtomicU64,
    failing: AtomicBool,
}

impl InMemoryMediaHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the host were unreachable.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Identifiers of images currently held.
    pub async fn stored(&self) -> Vec<String> {
        self.stored.read().await.clone()
    }

    /// Every identifier a deletion was attempted for, in order.
    pub async fn destroyed(&self) -> Vec<String> {
        self.destroyed.read().await.clone()
    }

    fn check_available(&self) -> Result<(), MediaError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MediaError::Transport("in-memory host set to fail".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl MediaHost for InMemoryMediaHost {
    async fn upload(&self, image: ImageUpload) -> Result<UploadedImage, MediaError> {
        self.check_available()?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let extension = image
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_else(|| "img".to_string());
        let public_id = format!("staplab-admin-images/memory-{n}");
        let url = format!("memory://media/upload/v{n}/{public_id}.{extension}");

        self.stored.write().await.push(public_id.clone());
        Ok(UploadedImage { url, public_id })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), MediaError> {
        self.destroyed.write().await.push(public_id.to_owned());
        self.check_available()?;
        self.stored.write().await.retain(|id| id != public_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use staplab_core::media::public_id_from_url;

    fn upload(name: &str) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        }
    }

    #[tokio::test]
    async fn test_uploaded_url_decodes_to_its_identifier() {
        let host = InMemoryMediaHost::new();
        let uploaded = host.upload(upload("cover.PNG")).await.unwrap();

        assert_eq!(public_id_from_url(&uploaded.url), Some(uploaded.public_id.clone()));
        assert!(uploaded.url.ends_with(".png"));
        assert_eq!(host.stored().await, [uploaded.public_id]);
    }

    #[tokio::test]
    async fn test_destroy_is_recorded_even_when_failing() {
        let host = InMemoryMediaHost::new();
        let uploaded = host.upload(upload("a.jpg")).await.unwrap();
        host.set_failing(true);

        assert!(host.destroy(&uploaded.public_id).await.is_err());
        assert_eq!(host.destroyed().await, [uploaded.public_id.clone()]);
        assert_eq!(host.stored().await, [uploaded.public_id]);
    }
}
