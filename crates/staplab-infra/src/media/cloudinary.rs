//! Cloudinary media host over its signed REST API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};

use staplab_core::ports::{ImageUpload, MediaError, MediaHost, UploadedImage};

use super::CloudinaryConfig;

const API_BASE_URL: &str = "https://api.cloudinary.com/v1_1";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

pub struct CloudinaryMediaHost {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryMediaHost {
    pub fn new(config: CloudinaryConfig) -> Result<Self, MediaError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| MediaError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{API_BASE_URL}/{}/image/{action}", self.config.cloud_name)
    }

    async fn read_error(response: reqwest::Response) -> MediaError {
        let status = response.status().as_u16();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error.message,
            Err(_) => "unexpected response".to_string(),
        };
        MediaError::Api { status, message }
    }
}

#[async_trait]
impl MediaHost for CloudinaryMediaHost {
    async fn upload(&self, image: ImageUpload) -> Result<UploadedImage, MediaError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign(
            &[
                ("allowed_formats", self.config.allowed_formats.as_str()),
                ("folder", self.config.folder.as_str()),
                ("timestamp", timestamp.as_str()),
                ("transformation", self.config.transformation.as_str()),
            ],
            &self.config.api_secret,
        );

        let file = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .map_err(|e| MediaError::Rejected(e.to_string()))?;
        let form = Form::new()
            .part("file", file)
            .text("api_key", self.config.api_key.clone())
            .text("allowed_formats", self.config.allowed_formats.clone())
            .text("timestamp", timestamp)
            .text("folder", self.config.folder.clone())
            .text("transformation", self.config.transformation.clone())
            .text("signature", signature);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::Transport(e.to_string()))?;
        tracing::info!(public_id = %body.public_id, "Image uploaded");
        Ok(UploadedImage {
            url: body.secure_url,
            public_id: body.public_id,
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), MediaError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign(
            &[("public_id", public_id), ("timestamp", timestamp.as_str())],
            &self.config.api_secret,
        );
        let params = [
            ("public_id", public_id),
            ("timestamp", timestamp.as_str()),
            ("api_key", self.config.api_key.as_str()),
            ("signature", signature.as_str()),
        ];

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .form(&params)
            .send()
            .await
            .map_err(|e| MediaError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }

        let body: DestroyResponse = response
            .json()
            .await
            .map_err(|e| MediaError::Transport(e.to_string()))?;
        match body.result.as_str() {
            // Already gone is as good as deleted.
            "ok" | "not found" => Ok(()),
            other => Err(MediaError::Api {
                status: 200,
                message: other.to_string(),
            }),
        }
    }
}

/// Cloudinary request signature: SHA-1 over the `&`-joined, name-sorted
/// parameters followed by the API secret.
fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by_key(|(name, _)| *name);
    let to_sign = sorted
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sha1_hex(input: &str) -> String {
        hex::encode(Sha1::digest(input.as_bytes()))
    }

    #[test]
    fn test_signature_sorts_parameters() {
        let forward = sign(&[("folder", "lab"), ("timestamp", "10")], "secret");
        let reversed = sign(&[("timestamp", "10"), ("folder", "lab")], "secret");

        assert_eq!(forward, reversed);
        assert_eq!(forward, sha1_hex("folder=lab&timestamp=10secret"));
        assert_eq!(forward.len(), 40);
    }

    #[test]
    fn test_signature_depends_on_secret() {
        let params = [("public_id", "lab/cover"), ("timestamp", "10")];
        assert_ne!(sign(&params, "one"), sign(&params, "two"));
    }

    #[test]
    fn test_endpoint_targets_cloud() {
        let host =
            CloudinaryMediaHost::new(CloudinaryConfig::new("staplab".into(), "k".into(), "s".into()))
                .unwrap();
        assert_eq!(
            host.endpoint("destroy"),
            "https://api.cloudinary.com/v1_1/staplab/image/destroy"
        );
    }
}
