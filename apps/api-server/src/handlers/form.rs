//! Bodies of the image-bearing endpoints: JSON, or `multipart/form-data`
//! whose optional `image` file part is pushed to the media host first.

use actix_multipart::Multipart;
use actix_web::{HttpRequest, http::header, web};
use futures::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use staplab_core::ports::{ImageUpload, UploadedImage};

use crate::config::JSON_LIMIT_BYTES;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Decoded request fields plus the image uploaded on the request's behalf.
pub struct EntityForm<T> {
    pub fields: T,
    pub upload: Option<UploadedImage>,
}

impl<T: DeserializeOwned> EntityForm<T> {
    pub async fn read(
        req: &HttpRequest,
        payload: web::Payload,
        state: &AppState,
    ) -> AppResult<Self> {
        if is_multipart(req) {
            read_multipart(req, payload, state).await
        } else {
            Ok(Self {
                fields: read_json(payload).await?,
                upload: None,
            })
        }
    }
}

/// Read a JSON object body. An empty body reads as `{}`.
pub async fn read_json<T: DeserializeOwned>(mut payload: web::Payload) -> AppResult<T> {
    let body = collect(&mut payload, JSON_LIMIT_BYTES, "Request body too large").await?;
    let value = if body.is_empty() {
        Value::Object(Map::new())
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::bad_request(format!("Invalid JSON body: {e}")))?
    };
    decode(value)
}

async fn read_multipart<T: DeserializeOwned>(
    req: &HttpRequest,
    payload: web::Payload,
    state: &AppState,
) -> AppResult<EntityForm<T>> {
    let max_image = state.uploads.max_bytes;
    let too_large = format!(
        "File too large. Maximum size is {}MB.",
        max_image / (1024 * 1024)
    );

    let mut multipart = Multipart::new(req.headers(), payload);
    let mut fields = Map::new();
    let mut image = None;

    while let Some(item) = multipart.next().await {
        let mut field =
            item.map_err(|e| AppError::bad_request(format!("Invalid multipart body: {e}")))?;
        let disposition = field.content_disposition();
        let name = disposition.get_name().unwrap_or_default().to_string();
        let file_name = disposition.get_filename().map(str::to_owned);

        match (name.as_str(), file_name) {
            ("image", Some(file_name)) => {
                let content_type = field
                    .content_type()
                    .map(|mime| mime.essence_str().to_owned())
                    .unwrap_or_default();
                if !content_type.starts_with("image/") {
                    return Err(AppError::bad_request("Only image files are allowed"));
                }
                let bytes = collect(&mut field, max_image, &too_large).await?;
                image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            _ => {
                let bytes = collect(&mut field, JSON_LIMIT_BYTES, "Form field too large").await?;
                let text = String::from_utf8(bytes)
                    .map_err(|_| AppError::bad_request(format!("Invalid UTF-8 in field {name}")))?;
                fields.insert(name, Value::String(text));
            }
        }
    }

    let upload = match image {
        Some(image) => {
            let uploaded = state.media.upload(image).await?;
            tracing::debug!(public_id = %uploaded.public_id, "Stored request image");
            fields.insert("image".into(), Value::String(uploaded.url.clone()));
            fields.insert(
                "imagePublicId".into(),
                Value::String(uploaded.public_id.clone()),
            );
            Some(uploaded)
        }
        None => None,
    };

    match decode(Value::Object(fields)) {
        Ok(fields) => Ok(EntityForm { fields, upload }),
        Err(e) => {
            if let Some(uploaded) = &upload {
                state.images.discard_upload(uploaded).await;
            }
            Err(e)
        }
    }
}

fn is_multipart(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"))
}

/// Deserialize request fields, reporting type mismatches as bad requests.
pub fn decode<T: DeserializeOwned>(value: Value) -> AppResult<T> {
    if !value.is_object() {
        return Err(AppError::bad_request("Request body must be a JSON object"));
    }
    serde_json::from_value(value)
        .map_err(|e| AppError::bad_request(format!("Invalid request body: {e}")))
}

/// Buffer a byte stream, failing once it grows past `limit`.
async fn collect<S, E>(stream: &mut S, limit: usize, too_large: &str) -> AppResult<Vec<u8>>
where
    S: Stream<Item = Result<web::Bytes, E>> + Unpin,
    E: std::fmt::Display,
{
    let mut buffer = Vec::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| AppError::bad_request(format!("Failed to read body: {e}")))?;
        if buffer.len() + chunk.len() > limit {
            return Err(AppError::bad_request(too_large));
        }
        buffer.extend_from_slice(&chunk);
    }
    Ok(buffer)
}
