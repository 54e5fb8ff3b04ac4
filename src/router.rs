use std::any::Any;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};

use crate::{api, error::AppError, state::AppState, web_pages};

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_content_length;
    let static_files = ServeDir::new(&state.config.static_dir)
        .not_found_service(endpoint_not_found.into_service());
    let routes = Router::new()
        .route("/", get(web_pages::home))
        .route("/api/upload", post(api::upload_image))
        .route("/api/process", post(api::process_ocr))
        .route("/api/translate", post(api::translate_text))
        .route("/api/download", post(api::download_text))
        .route("/api/health", get(api::health_check))
        .route("/uploads/{filename}", get(web_pages::serve_upload))
        .nest_service("/static", static_files);
    with_layers(routes, body_limit).with_state(state)
}

/// Fallbacks, body limit, request tracing and panic recovery shared by every route.
fn with_layers(routes: Router<AppState>, body_limit: usize) -> Router<AppState> {
    routes
        .fallback(endpoint_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
}

async fn endpoint_not_found() -> AppError {
    AppError::EndpointNotFound
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = detail, "handler panicked");
    AppError::Unhandled.into_response()
}
