use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};

use crate::{
    api::{iso_timestamp, now_local},
    error::AppError,
    simulated::{self, OcrStats, ocr::SERVER_LABEL},
    state::AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct ProcessRequest {
    pub language: Option<String>,
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub success: bool,
    pub text: String,
    pub confidence: f64,
    pub stats: OcrStats,
    pub language: String,
    pub timestamp: String,
    pub server: String,
}

pub async fn process_ocr(
    State(state): State<AppState>,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> Result<Json<ProcessResponse>, AppError> {
    let request = payload.map(|Json(request)| request).map_err(|rejection| {
        AppError::from_json_rejection(rejection, &state.limit_label(), |rejection| {
            AppError::Internal(rejection.body_text())
        })
    })?;
    let language = request.language.unwrap_or_else(|| "eng".to_string());
    let mode = request.mode.unwrap_or_else(|| "balanced".to_string());

    let generated = now_local();
    let recognized = simulated::recognize(&language, &mode, generated);
    tracing::info!(%language, %mode, "simulated ocr served");

    Ok(Json(ProcessResponse {
        success: true,
        text: recognized.text,
        confidence: recognized.confidence,
        stats: recognized.stats,
        language,
        timestamp: iso_timestamp(generated),
        server: SERVER_LABEL.to_string(),
    }))
}
