pub mod api;
pub mod config;
pub mod error;
pub mod image_processing;
pub mod router;
pub mod simulated;
pub mod state;
pub mod storage;
pub mod web_pages;

pub use config::AppConfig;
pub use error::AppError;
pub use router::build_router;
pub use state::AppState;
