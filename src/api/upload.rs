use axum::{Json, extract::State, extract::rejection::JsonRejection};
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{
    api::now_local,
    error::AppError,
    image_processing::{self, JPEG_QUALITY},
    state::AppState,
    storage::{StoredUpload, UploadStorage},
};

const NO_IMAGE: &str = "No image data provided";

#[derive(Debug, Default, Deserialize)]
pub struct UploadRequest {
    /// `None` only when the key is absent; an explicit `null` is `Some(Value::Null)`.
    #[serde(default, deserialize_with = "present")]
    pub image: Option<Value>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub filename: String,
    pub size: u64,
    pub url: String,
}

pub async fn upload_image(
    State(state): State<AppState>,
    payload: Result<Json<UploadRequest>, JsonRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let request = payload.map(|Json(request)| request).map_err(|rejection| {
        AppError::from_json_rejection(rejection, &state.limit_label(), |rejection| {
            tracing::debug!(%rejection, "upload body unreadable");
            AppError::BadRequest(NO_IMAGE.to_string())
        })
    })?;
    let encoded = match request.image {
        None => return Err(AppError::BadRequest(NO_IMAGE.to_string())),
        Some(Value::String(encoded)) => encoded,
        Some(other) => return Err(AppError::Internal(non_string_image(&other))),
    };

    let bytes = decode_image_payload(&encoded)?;
    let detected = image_processing::detect_mime_type(&bytes);
    let stored = state.storage.create_upload(&bytes, now_local()).await?;
    tracing::info!(
        filename = %stored.filename,
        raw_size = stored.size,
        detected = detected.unwrap_or("unknown"),
        "upload stored"
    );

    let size = optimize_upload(&state.storage, &stored).await;
    let url = state.storage.public_url(&stored.filename);
    Ok(Json(UploadResponse {
        success: true,
        message: "Image uploaded successfully".to_string(),
        filename: stored.filename,
        size,
        url,
    }))
}

fn non_string_image(value: &Value) -> String {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
        Value::String(_) => "a string",
    };
    format!("image must be a base64 string, got {kind}")
}

/// Strips an optional `data:<mime>;base64,` header and decodes the rest.
pub fn decode_image_payload(encoded: &str) -> Result<Vec<u8>, AppError> {
    let data = encoded.split(',').nth(1).unwrap_or(encoded);
    let cleaned: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(cleaned.as_bytes())
        .map_err(|err| AppError::Internal(format!("Invalid base64 image data: {err}")))
}

/// Re-saves the upload as JPEG. Failures are logged and the on-disk size of
/// the untouched file is reported instead.
async fn optimize_upload(storage: &UploadStorage, stored: &StoredUpload) -> u64 {
    let path = stored.path.clone();
    let outcome =
        tokio::task::spawn_blocking(move || image_processing::optimize_file(&path, JPEG_QUALITY))
            .await;
    match outcome {
        Ok(Ok(optimized)) => {
            tracing::debug!(
                filename = %stored.filename,
                width = optimized.width,
                height = optimized.height,
                size = optimized.size,
                "upload re-encoded as jpeg"
            );
            return optimized.size;
        }
        Ok(Err(err)) => {
            tracing::warn!(filename = %stored.filename, error = %err, "image optimization failed");
        }
        Err(err) => {
            tracing::warn!(filename = %stored.filename, error = %err, "image optimization task failed");
        }
    }
    match storage.size(&stored.path).await {
        Ok(size) => size,
        Err(err) => {
            tracing::warn!(filename = %stored.filename, error = %err, "could not stat upload");
            stored.size
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_header_is_stripped() {
        let bytes = decode_image_payload("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn bare_base64_decodes() {
        assert_eq!(decode_image_payload("aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn embedded_line_breaks_are_ignored() {
        assert_eq!(decode_image_payload("aGVs\nbG8=").unwrap(), b"hello");
    }

    #[test]
    fn explicit_null_image_is_kept_distinct_from_missing() {
        let missing: UploadRequest = serde_json::from_str("{}").unwrap();
        let null: UploadRequest = serde_json::from_str(r#"{"image": null}"#).unwrap();
        assert!(missing.image.is_none());
        assert_eq!(null.image, Some(Value::Null));
    }

    #[test]
    fn malformed_base64_is_internal_error() {
        let err = decode_image_payload("***not base64***").unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
