use std::env;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_TEMPLATE_PATH: &str = "templates/index.html";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 16 * 1024 * 1024;

/// Immutable server configuration, built once at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_address: String,
    pub upload_dir: PathBuf,
    pub template_path: PathBuf,
    pub static_dir: PathBuf,
    pub max_content_length: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: format!("{DEFAULT_HOST}:{DEFAULT_PORT}"),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
        }
    }
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Self {
        let host = non_empty_var("BIKER_OCR_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parsed_var("BIKER_OCR_PORT", DEFAULT_PORT);
        Self {
            bind_address: format!("{host}:{port}"),
            upload_dir: resolve_path("UPLOAD_DIR", DEFAULT_UPLOAD_DIR),
            template_path: resolve_path("TEMPLATE_PATH", DEFAULT_TEMPLATE_PATH),
            static_dir: resolve_path("STATIC_DIR", DEFAULT_STATIC_DIR),
            max_content_length: parsed_var("MAX_CONTENT_LENGTH", DEFAULT_MAX_CONTENT_LENGTH),
        }
    }

    /// Human readable limit used in the 413 message, e.g. `16MB`.
    pub fn max_content_length_label(&self) -> String {
        let mib = self.max_content_length / (1024 * 1024);
        if mib > 0 && mib * 1024 * 1024 == self.max_content_length {
            format!("{mib}MB")
        } else {
            format!("{} bytes", self.max_content_length)
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn resolve_path(name: &str, default: &str) -> PathBuf {
    non_empty_var(name)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

fn parsed_var<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    let Some(raw) = non_empty_var(name) else {
        return default;
    };
    match raw.parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            let fallback = default.to_string();
            tracing::warn!(variable = name, value = %raw, %fallback, "ignoring unparseable setting");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limit_renders_in_megabytes() {
        assert_eq!(AppConfig::default().max_content_length_label(), "16MB");
    }

    #[test]
    fn odd_limit_renders_in_bytes() {
        let config = AppConfig {
            max_content_length: 1500,
            ..AppConfig::default()
        };
        assert_eq!(config.max_content_length_label(), "1500 bytes");
    }
}
