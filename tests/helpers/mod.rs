use std::io::Cursor;
use std::path::PathBuf;

use axum_test::TestServer;
use base64::Engine;
use biker_ocr::{AppConfig, AppState, build_router};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use tempfile::TempDir;

/// Test application backed by a throwaway upload directory.
pub struct TestApp {
    pub server: TestServer,
    pub upload_dir: PathBuf,
    pub static_dir: PathBuf,
    pub _temp_dir: TempDir,
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {})
}

pub fn setup_test_app_with(customize: impl FnOnce(&mut AppConfig)) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let upload_dir = temp_dir.path().join("uploads");
    let mut config = AppConfig {
        upload_dir: upload_dir.clone(),
        template_path: temp_dir.path().join("templates").join("index.html"),
        static_dir: temp_dir.path().join("static"),
        ..AppConfig::default()
    };
    customize(&mut config);
    let static_dir = config.static_dir.clone();

    let server = TestServer::new(build_router(AppState::new(config)))
        .expect("Failed to start test server");
    TestApp {
        server,
        upload_dir,
        static_dir,
        _temp_dir: temp_dir,
    }
}

/// Semi-transparent PNG, as a browser `readAsDataURL` would send it.
pub fn png_data_url(width: u32, height: u32) -> String {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba([30, 144, 255, 96]),
    ));
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .expect("Failed to encode png");
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    )
}

pub fn is_upload_filename(name: &str) -> bool {
    let Some(stem) = name
        .strip_prefix("biker_")
        .and_then(|rest| rest.strip_suffix(".jpg"))
    else {
        return false;
    };
    let parts: Vec<&str> = stem.split('_').collect();
    matches!(parts.as_slice(), [date, time, micros]
        if date.len() == 8 && time.len() == 6 && micros.len() == 6
            && [date, time, micros].iter().all(|part| part.chars().all(|c| c.is_ascii_digit())))
}
