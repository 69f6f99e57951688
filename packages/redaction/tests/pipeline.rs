//! Integration tests for the redaction workflow.
//!
//! Drive the pipeline with mock OCR and PII collaborators plus the real
//! rasterizer, and verify that the matched words end up blacked out.

use std::io::Cursor;
use std::sync::Arc;

use image::{ImageFormat, Rgb, RgbImage};
use redaction::testing::{MockDetector, MockExtractor, MockRasterizer};
use redaction::{
    BoundingBox, ExtractedText, PngRasterizer, RedactionError, RedactionPipeline, WordToken,
};

/// Helper to build a word at a known location.
fn word(text: &str, x: f32, y: f32) -> WordToken {
    WordToken::new(text, BoundingBox::new(x, y, 20.0, 10.0)).with_confidence(0.9)
}

/// Encode a solid white test image as PNG bytes.
fn white_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png).unwrap();
    buffer.into_inner()
}

#[tokio::test]
async fn redacts_matched_words_in_the_output_image() {
    let extracted = ExtractedText::new(
        "John Doe was here",
        vec![
            word("John", 0.0, 0.0),
            word("Doe", 30.0, 0.0),
            word("was", 60.0, 0.0),
            word("here", 0.0, 20.0),
        ],
    );

    let pipeline = RedactionPipeline::new(
        Arc::new(MockExtractor::new().with_result(extracted)),
        Arc::new(MockDetector::new().with_values(["John Doe"])),
        Arc::new(PngRasterizer::new()),
    );

    let source = white_png(100, 40);
    let redacted = pipeline.redact(&source).await.unwrap();
    assert_eq!(redacted.content_type, "image/png");

    let img = image::load_from_memory(&redacted.content).unwrap().to_rgb8();

    // "John" and "Doe" regions are black
    assert_eq!(*img.get_pixel(5, 5), Rgb([0, 0, 0]));
    assert_eq!(*img.get_pixel(35, 5), Rgb([0, 0, 0]));

    // "was" and "here" regions untouched
    assert_eq!(*img.get_pixel(65, 5), Rgb([255, 255, 255]));
    assert_eq!(*img.get_pixel(5, 25), Rgb([255, 255, 255]));
}

#[tokio::test]
async fn no_pii_still_returns_reencoded_png() {
    let extracted = ExtractedText::new("hello world", vec![word("hello", 0.0, 0.0)]);

    let pipeline = RedactionPipeline::new(
        Arc::new(MockExtractor::new().with_result(extracted)),
        Arc::new(MockDetector::new()),
        Arc::new(PngRasterizer::new()),
    );

    let source = white_png(30, 20);
    let redacted = pipeline.redact(&source).await.unwrap();

    let img = image::load_from_memory(&redacted.content).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (30, 20));
    assert_eq!(*img.get_pixel(5, 5), Rgb([255, 255, 255]));
}

#[tokio::test]
async fn empty_image_text_skips_detection() {
    let detector = Arc::new(MockDetector::new().with_values(["should not be used"]));

    let pipeline = RedactionPipeline::new(
        Arc::new(MockExtractor::new()),
        detector.clone(),
        Arc::new(MockRasterizer::new()),
    );

    pipeline.redact(&white_png(10, 10)).await.unwrap();

    assert!(detector.calls().is_empty());
}

#[tokio::test]
async fn detector_sees_the_full_extracted_text() {
    let extracted = ExtractedText::new(
        "Card: 4532 1234",
        vec![word("Card:", 0.0, 0.0), word("4532", 30.0, 0.0), word("1234", 60.0, 0.0)],
    );
    let detector = Arc::new(MockDetector::new().with_values(["4532 1234"]));
    let rasterizer = Arc::new(MockRasterizer::new());

    let pipeline = RedactionPipeline::new(
        Arc::new(MockExtractor::new().with_result(extracted)),
        detector.clone(),
        rasterizer.clone(),
    );

    pipeline.redact(&white_png(10, 10)).await.unwrap();

    assert_eq!(detector.calls(), vec!["Card: 4532 1234"]);

    // Both digit groups redacted, the label untouched
    let seen = rasterizer.regions_seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0],
        vec![
            BoundingBox::new(30.0, 0.0, 20.0, 10.0),
            BoundingBox::new(60.0, 0.0, 20.0, 10.0),
        ]
    );
}

#[tokio::test]
async fn extractor_failure_propagates() {
    let pipeline = RedactionPipeline::new(
        Arc::new(MockExtractor::new().with_failure("ocr down")),
        Arc::new(MockDetector::new()),
        Arc::new(MockRasterizer::new()),
    );

    let err = pipeline.redact(&white_png(10, 10)).await.unwrap_err();
    assert!(matches!(err, RedactionError::Config(_)));
}

#[tokio::test]
async fn detector_failure_propagates() {
    let extracted = ExtractedText::new("text", vec![word("text", 0.0, 0.0)]);

    let pipeline = RedactionPipeline::new(
        Arc::new(MockExtractor::new().with_result(extracted)),
        Arc::new(MockDetector::new().with_failure("quota exceeded")),
        Arc::new(MockRasterizer::new()),
    );

    assert!(pipeline.redact(&white_png(10, 10)).await.is_err());
}
