use axum::{
    Json,
    body::Body,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::Response,
};
use chrono::NaiveDateTime;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;

use crate::{api::now_local, error::AppError, state::AppState};

const DEFAULT_TEXT: &str = "No text available";

/// Absent and `null` fields both fall back to their defaults.
#[derive(Debug, Default, Deserialize)]
pub struct DownloadRequest {
    pub text: Option<String>,
    pub filename: Option<String>,
}

pub async fn download_text(
    State(state): State<AppState>,
    payload: Result<Json<DownloadRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let request = payload.map(|Json(request)| request).map_err(|rejection| {
        AppError::from_json_rejection(rejection, &state.limit_label(), |rejection| {
            AppError::Internal(rejection.body_text())
        })
    })?;
    let text = request.text.unwrap_or_else(|| DEFAULT_TEXT.to_string());
    let filename = request
        .filename
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| default_filename(now_local()));

    tracing::info!(%filename, bytes = text.len(), "text download served");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(header::CONTENT_DISPOSITION, content_disposition(&filename))
        .body(Body::from(text.into_bytes()))
        .map_err(|err| {
            tracing::error!(error = %err, "failed to build download response");
            AppError::Internal(err.to_string())
        })
}

pub fn default_filename(at: NaiveDateTime) -> String {
    format!("biker_ocr_{}.txt", at.format("%Y%m%d_%H%M%S"))
}

fn is_header_safe(c: char) -> bool {
    c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\'
}

/// `attachment; filename="..."`, adding an RFC 5987 `filename*` when the
/// name cannot travel as a plain quoted string.
pub fn content_disposition(filename: &str) -> String {
    if filename.chars().all(is_header_safe) {
        return format!("attachment; filename=\"{filename}\"");
    }
    let fallback: String = filename
        .chars()
        .map(|c| if is_header_safe(c) { c } else { '_' })
        .collect();
    let encoded = utf8_percent_encode(filename, NON_ALPHANUMERIC);
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}
