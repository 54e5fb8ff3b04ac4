pub mod local;
pub mod naming;

pub use local::{StoredUpload, UploadStorage};
pub use naming::{is_plain_filename, upload_filename};

pub const UPLOADS_URL_PREFIX: &str = "/uploads";
