use std::path::Path;

use anyhow::{Result, anyhow};
use image::{
    ColorType, DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage,
    codecs::jpeg::JpegEncoder,
};

pub const JPEG_QUALITY: u8 = 85;

/// Outcome of re-saving an upload as JPEG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Optimized {
    pub width: u32,
    pub height: u32,
    pub size: u64,
}

pub fn detect_mime_type(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some("image/png");
    }
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    if bytes.starts_with(b"BM") {
        return Some("image/bmp");
    }
    None
}

pub fn mime_to_format(mime_type: &str) -> Result<ImageFormat> {
    match mime_type {
        "image/png" => Ok(ImageFormat::Png),
        "image/jpeg" | "image/jpg" => Ok(ImageFormat::Jpeg),
        "image/gif" => Ok(ImageFormat::Gif),
        "image/webp" => Ok(ImageFormat::WebP),
        "image/bmp" => Ok(ImageFormat::Bmp),
        _ => Err(anyhow!("unsupported mime type: {mime_type}")),
    }
}

/// Composites any alpha channel over white. Opaque images only change
/// colour model where JPEG cannot carry it.
pub fn flatten_for_jpeg(image: DynamicImage) -> DynamicImage {
    if image.color().has_alpha() {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut output = RgbImage::new(width, height);
        for (x, y, pixel) in rgba.enumerate_pixels() {
            let [r, g, b, a] = pixel.0;
            let alpha = a as u32;
            let blend = |channel: u8| -> u8 {
                ((channel as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8
            };
            output.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
        }
        return DynamicImage::ImageRgb8(output);
    }
    match image.color() {
        ColorType::L8 | ColorType::Rgb8 => image,
        ColorType::L16 => DynamicImage::ImageLuma8(image.to_luma8()),
        _ => DynamicImage::ImageRgb8(image.to_rgb8()),
    }
}

pub fn encode_jpeg(bytes: &[u8], quality: u8) -> Result<(Vec<u8>, u32, u32)> {
    let mime_type = detect_mime_type(bytes).ok_or_else(|| anyhow!("unrecognized image data"))?;
    let format = mime_to_format(mime_type)?;
    let image = image::load_from_memory_with_format(bytes, format)
        .map_err(|err| anyhow!("decode image failed: {err}"))?;
    let (width, height) = image.dimensions();
    let flattened = flatten_for_jpeg(image);
    let mut output = Vec::new();
    flattened
        .write_with_encoder(JpegEncoder::new_with_quality(&mut output, quality))
        .map_err(|err| anyhow!("encode jpeg failed: {err}"))?;
    Ok((output, width, height))
}

/// Re-saves the file at `path` as JPEG in place. Blocking; run it off the async runtime.
pub fn optimize_file(path: &Path, quality: u8) -> Result<Optimized> {
    let bytes = std::fs::read(path)?;
    let (encoded, width, height) = encode_jpeg(&bytes, quality)?;
    std::fs::write(path, &encoded)?;
    Ok(Optimized {
        width,
        height,
        size: encoded.len() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{LumaA, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(image: DynamicImage) -> Vec<u8> {
        let mut output = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut output), ImageFormat::Png)
            .unwrap();
        output
    }

    #[test]
    fn transparent_pixels_become_white() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0])));
        let flattened = flatten_for_jpeg(image);
        assert_eq!(flattened.color(), ColorType::Rgb8);
        assert_eq!(flattened.to_rgb8().get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn opaque_pixels_keep_colour() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([10, 20, 30, 255])));
        let flattened = flatten_for_jpeg(image);
        assert_eq!(flattened.to_rgb8().get_pixel(0, 0).0, [10, 20, 30]);
    }

    #[test]
    fn grey_alpha_flattens_to_rgb() {
        let image = DynamicImage::ImageLumaA8(image::ImageBuffer::from_pixel(1, 1, LumaA([0, 0])));
        assert_eq!(flatten_for_jpeg(image).color(), ColorType::Rgb8);
    }

    #[test]
    fn png_reencodes_as_jpeg() {
        let png = png_bytes(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            8,
            4,
            Rgba([200, 10, 10, 128]),
        )));
        let (jpeg, width, height) = encode_jpeg(&png, JPEG_QUALITY).unwrap();
        assert_eq!((width, height), (8, 4));
        assert_eq!(detect_mime_type(&jpeg), Some("image/jpeg"));
        let decoded = image::load_from_memory_with_format(&jpeg, ImageFormat::Jpeg).unwrap();
        assert_eq!(decoded.dimensions(), (8, 4));
    }

    #[test]
    fn non_image_bytes_fail() {
        assert!(encode_jpeg(b"hello", JPEG_QUALITY).is_err());
    }

    #[test]
    fn optimize_rewrites_file_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload.jpg");
        let png = png_bytes(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            3,
            3,
            Rgba([0, 255, 0, 255]),
        )));
        std::fs::write(&path, &png).unwrap();

        let optimized = optimize_file(&path, JPEG_QUALITY).unwrap();

        let on_disk = std::fs::read(&path).unwrap();
        assert_eq!(optimized.size, on_disk.len() as u64);
        assert_eq!(detect_mime_type(&on_disk), Some("image/jpeg"));
    }
}
