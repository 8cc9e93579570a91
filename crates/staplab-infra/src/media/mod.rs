//! Media host implementations.

#[cfg(feature = "cloudinary")]
mod cloudinary;
mod memory;

#[cfg(feature = "cloudinary")]
pub use cloudinary::CloudinaryMediaHost;
pub use memory::InMemoryMediaHost;

/// Cloudinary account and upload settings.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Folder every upload lands in.
    pub folder: String,
    /// Incoming transformation applied on upload.
    pub transformation: String,
    pub allowed_formats: String,
}

impl CloudinaryConfig {
    pub fn new(cloud_name: String, api_key: String, api_secret: String) -> Self {
        Self {
            cloud_name,
            api_key,
            api_secret,
            folder: "staplab-admin-images".to_string(),
            transformation: "c_fill,h_630,w_1200/q_auto/f_auto".to_string(),
            allowed_formats: "jpg,jpeg,png,gif,webp".to_string(),
        }
    }
}
