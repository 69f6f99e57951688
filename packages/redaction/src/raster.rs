//! PNG rasterizer: fill redaction regions with black and re-encode.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use tracing::debug;

use crate::error::Result;
use crate::traits::Rasterizer;
use crate::types::{BoundingBox, RedactedImage};

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Rasterizer that fills regions with black and re-encodes to PNG.
///
/// The source image may be any format the `image` crate can decode; output
/// is always PNG. Alpha is dropped by converting to RGB first, so redacted
/// pixels cannot leak through transparency.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngRasterizer;

impl PngRasterizer {
    pub fn new() -> Self {
        Self
    }
}

fn fill_regions(img: &mut RgbImage, regions: &[BoundingBox]) {
    let (width, height) = img.dimensions();

    for region in regions {
        let Some((x0, y0, x1, y1)) = region.to_pixel_rect(width, height) else {
            debug!(?region, "region outside image bounds, skipping");
            continue;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                img.put_pixel(x, y, BLACK);
            }
        }
    }
}

impl Rasterizer for PngRasterizer {
    fn redact(&self, image: &[u8], regions: &[BoundingBox]) -> Result<RedactedImage> {
        let mut rgb = image::load_from_memory(image)?.to_rgb8();

        fill_regions(&mut rgb, regions);

        let mut buffer = Cursor::new(Vec::new());
        rgb.write_to(&mut buffer, ImageFormat::Png)?;

        debug!(
            regions = regions.len(),
            bytes = buffer.get_ref().len(),
            "image re-encoded"
        );

        Ok(RedactedImage {
            content: buffer.into_inner(),
            content_type: "image/png",
        })
    }

    fn name(&self) -> &str {
        "png"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Encode a solid white RGB image as PNG bytes.
    fn white_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_fills_region_with_black() {
        let source = white_png(20, 20);
        let rasterizer = PngRasterizer::new();

        let result = rasterizer
            .redact(&source, &[BoundingBox::new(5.0, 5.0, 10.0, 10.0)])
            .unwrap();
        assert_eq!(result.content_type, "image/png");

        let redacted = image::load_from_memory(&result.content).unwrap().to_rgb8();
        assert_eq!(*redacted.get_pixel(10, 10), Rgb([0, 0, 0]));
        assert_eq!(*redacted.get_pixel(0, 0), Rgb([255, 255, 255]));
        assert_eq!(*redacted.get_pixel(19, 19), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_empty_region_list_still_reencodes() {
        let source = white_png(4, 4);
        let result = PngRasterizer::new().redact(&source, &[]).unwrap();

        let redacted = image::load_from_memory(&result.content).unwrap().to_rgb8();
        assert_eq!(redacted.dimensions(), (4, 4));
        assert_eq!(*redacted.get_pixel(2, 2), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_region_overflowing_image_is_clamped() {
        let source = white_png(10, 10);
        let result = PngRasterizer::new()
            .redact(&source, &[BoundingBox::new(8.0, 8.0, 100.0, 100.0)])
            .unwrap();

        let redacted = image::load_from_memory(&result.content).unwrap().to_rgb8();
        assert_eq!(*redacted.get_pixel(9, 9), Rgb([0, 0, 0]));
        assert_eq!(*redacted.get_pixel(7, 7), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_region_entirely_outside_is_skipped() {
        let source = white_png(10, 10);
        let result = PngRasterizer::new()
            .redact(&source, &[BoundingBox::new(50.0, 50.0, 5.0, 5.0)])
            .unwrap();

        let redacted = image::load_from_memory(&result.content).unwrap().to_rgb8();
        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(*redacted.get_pixel(x, y), Rgb([255, 255, 255]));
            }
        }
    }

    #[test]
    fn test_garbage_bytes_are_an_image_error() {
        let err = PngRasterizer::new().redact(b"not an image", &[]).unwrap_err();
        assert!(matches!(err, crate::error::RedactionError::Image(_)));
    }
}
