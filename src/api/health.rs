use std::collections::BTreeMap;

use axum::Json;
use serde::Serialize;

use crate::api::{iso_timestamp, now_local};

pub const SERVICE_NAME: &str = "Biker OCR API";

pub const ENDPOINTS: [(&str, &str); 6] = [
    ("GET /", "Home page"),
    ("POST /api/upload", "Upload image"),
    ("POST /api/process", "Process OCR"),
    ("POST /api/translate", "Translate text"),
    ("POST /api/download", "Download text"),
    ("GET /api/health", "Health check"),
];

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

/// Handler for `GET /api/health`
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: iso_timestamp(now_local()),
        endpoints: ENDPOINTS.into_iter().collect(),
    })
}
