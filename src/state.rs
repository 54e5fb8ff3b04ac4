use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::{UPLOADS_URL_PREFIX, UploadStorage};

/// Shared, read-only state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub storage: Arc<UploadStorage>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let storage = UploadStorage::new(config.upload_dir.clone(), UPLOADS_URL_PREFIX);
        Self {
            config: Arc::new(config),
            storage: Arc::new(storage),
        }
    }

    pub fn limit_label(&self) -> String {
        self.config.max_content_length_label()
    }
}
