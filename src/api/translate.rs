use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};

use crate::{
    api::{iso_timestamp, now_local},
    error::AppError,
    simulated,
    state::AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct TranslateRequest {
    pub text: Option<String>,
    #[serde(rename = "from")]
    pub source: Option<String>,
    #[serde(rename = "to")]
    pub target: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub success: bool,
    pub translated: String,
    pub original: String,
    #[serde(rename = "from")]
    pub source: String,
    #[serde(rename = "to")]
    pub target: String,
    pub timestamp: String,
}

pub async fn translate_text(
    State(state): State<AppState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, AppError> {
    let request = payload.map(|Json(request)| request).map_err(|rejection| {
        AppError::from_json_rejection(rejection, &state.limit_label(), |rejection| {
            AppError::Internal(rejection.body_text())
        })
    })?;
    let text = request.text.unwrap_or_default();
    let source = request.source.unwrap_or_else(|| "auto".to_string());
    let target = request.target.unwrap_or_else(|| "id".to_string());

    let generated = now_local();
    let translated = simulated::translate(&text, &source, &target, generated);
    tracing::info!(from = %source, to = %target, chars = text.chars().count(), "simulated translation served");

    Ok(Json(TranslateResponse {
        success: true,
        translated,
        original: text,
        source,
        target,
        timestamp: iso_timestamp(generated),
    }))
}
