use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::header,
    response::{Html, IntoResponse, Response},
};

use crate::{error::AppError, state::AppState, storage::is_plain_filename};

const FALLBACK_HTML: &str = include_str!("../templates/fallback.html");

/// Serves the configured page byte-for-byte, or a fixed error page when it
/// cannot be read. Always 200.
pub async fn home(State(state): State<AppState>) -> Response {
    match tokio::fs::read(&state.config.template_path).await {
        Ok(bytes) => Html(bytes).into_response(),
        Err(err) => {
            tracing::warn!(
                path = %state.config.template_path.display(),
                error = %err,
                "home page template unreadable, serving fallback"
            );
            Html(FALLBACK_HTML).into_response()
        }
    }
}

pub async fn serve_upload(
    State(state): State<AppState>,
    filename: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    let Ok(Path(filename)) = filename else {
        return Err(AppError::FileNotFound);
    };
    if !is_plain_filename(&filename) {
        tracing::warn!(%filename, "rejected upload path outside the upload directory");
        return Err(AppError::FileNotFound);
    }
    match state.storage.get(&filename).await {
        Ok(Some(bytes)) => Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes).into_response()),
        Ok(None) => Err(AppError::FileNotFound),
        Err(err) => {
            tracing::warn!(%filename, error = %err, "upload unreadable");
            Err(AppError::FileNotFound)
        }
    }
}
