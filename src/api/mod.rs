pub mod download;
pub mod health;
pub mod process;
pub mod translate;
pub mod upload;

use chrono::{Local, NaiveDateTime};

pub use download::{DownloadRequest, download_text};
pub use health::{HealthResponse, health_check};
pub use process::{ProcessRequest, ProcessResponse, process_ocr};
pub use translate::{TranslateRequest, TranslateResponse, translate_text};
pub use upload::{UploadRequest, UploadResponse, upload_image};

pub(crate) fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Local time without offset, microsecond precision (`2024-05-01T12:30:00.123456`).
pub(crate) fn iso_timestamp(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
