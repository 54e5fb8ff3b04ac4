use std::path::{Component, Path};

use chrono::NaiveDateTime;

pub const UPLOAD_PREFIX: &str = "biker_";
pub const UPLOAD_EXTENSION: &str = "jpg";

/// `biker_<YYYYMMDD_HHMMSS_micros>.jpg`
pub fn upload_filename(at: NaiveDateTime) -> String {
    format!(
        "{UPLOAD_PREFIX}{}.{UPLOAD_EXTENSION}",
        at.format("%Y%m%d_%H%M%S_%6f")
    )
}

/// True when `name` is exactly one normal path component.
pub fn is_plain_filename(name: &str) -> bool {
    if name.is_empty() || name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
