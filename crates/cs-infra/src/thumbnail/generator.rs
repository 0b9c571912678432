use anyhow::{Context, Result};
use cs_core::ports::{Thumbnail, ThumbnailGeneratorPort};
use image::{imageops::FilterType, ColorType, GenericImageView};

const WEBP_MIME_TYPE: &str = "image/webp";

/// Downscales images and encodes the result as lossless WebP.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebpThumbnailGenerator;

impl WebpThumbnailGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ThumbnailGeneratorPort for WebpThumbnailGenerator {
    fn generate(&self, image_bytes: &[u8], max_edge: u32) -> Result<Thumbnail> {
        let decoded =
            image::load_from_memory(image_bytes).context("decode image bytes for thumbnail")?;
        let (original_width, original_height) = decoded.dimensions();
        let (target_width, target_height) =
            calculate_target_size(original_width, original_height, max_edge.max(1));

        let resized = if target_width == original_width && target_height == original_height {
            decoded
        } else {
            image::DynamicImage::ImageRgba8(image::imageops::resize(
                &decoded,
                target_width,
                target_height,
                FilterType::Triangle,
            ))
        };

        let rgba = resized.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut bytes = Vec::new();
        let encoder = image::codecs::webp::WebPEncoder::new_lossless(&mut bytes);
        encoder
            .encode(rgba.as_raw(), width, height, ColorType::Rgba8.into())
            .context("encode thumbnail to webp")?;

        Ok(Thumbnail {
            bytes,
            mime_type: WEBP_MIME_TYPE.to_string(),
            width,
            height,
        })
    }
}

/// Fit `width × height` into a `max_edge` square, keeping the aspect ratio. Never upscales.
fn calculate_target_size(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width <= max_edge && height <= max_edge {
        return (width, height);
    }

    if width >= height {
        let scaled_height = ((height as f64) * (max_edge as f64) / (width as f64)).round() as u32;
        (max_edge, scaled_height.max(1))
    } else {
        let scaled_width = ((width as f64) * (max_edge as f64) / (height as f64)).round() as u32;
        (scaled_width.max(1), max_edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = image::RgbImage::new(width, height);
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(image)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn resizes_landscape_to_max_edge() {
        let output = WebpThumbnailGenerator.generate(&png_bytes(256, 128), 128).unwrap();

        assert_eq!(output.mime_type, "image/webp");
        let decoded = image::load_from_memory(&output.bytes).unwrap();
        assert_eq!(decoded.width(), 128);
        assert_eq!(decoded.height(), 64);
        assert_eq!((output.width, output.height), (128, 64));
    }

    #[test]
    fn small_images_are_not_upscaled() {
        let output = WebpThumbnailGenerator.generate(&png_bytes(40, 30), 128).unwrap();
        assert_eq!((output.width, output.height), (40, 30));
    }

    #[test]
    fn portrait_scales_by_height() {
        assert_eq!(calculate_target_size(100, 400, 200), (50, 200));
        assert_eq!(calculate_target_size(1, 1000, 10), (1, 10));
    }

    #[test]
    fn garbage_input_is_an_error() {
        assert!(WebpThumbnailGenerator.generate(b"not an image", 64).is_err());
    }
}
