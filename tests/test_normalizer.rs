extern crate leaf_detect;

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, RgbaImage};
use leaf_detect::error::PipelineError;
use leaf_detect::normalizer;

fn checker(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            Rgb([200, 40, 40])
        } else {
            Rgb([40, 200, 40])
        }
    })
}

#[test]
fn already_canonical_image_passes_through_unchanged() {
    let src = checker(800, 600);
    let normalized = normalizer::normalize(&DynamicImage::ImageRgb8(src.clone()), 1024, true);

    assert_eq!(normalized.dimensions(), (800, 600));
    assert_eq!(normalized, src);
}

#[test]
fn wide_image_is_capped_at_max_width() {
    let src = DynamicImage::ImageRgb8(checker(2048, 1536));
    let normalized = normalizer::normalize(&src, 1024, true);

    assert_eq!(normalized.dimensions(), (1024, 768));
}

#[test]
fn new_height_uses_integer_floor() {
    // floor(997 * 1024 / 1500) = 680
    let src = DynamicImage::ImageRgb8(checker(1500, 997));
    let normalized = normalizer::normalize(&src, 1024, true);

    assert_eq!(normalized.dimensions(), (1024, 680));
}

#[test]
fn resize_disabled_passes_any_width_through() {
    let src = DynamicImage::ImageRgb8(checker(2048, 100));
    let normalized = normalizer::normalize(&src, 1024, false);

    assert_eq!(normalized.dimensions(), (2048, 100));
}

#[test]
fn non_rgb_modes_are_converted() {
    let grey = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(64, 64, image::Luma([128])));
    let normalized = normalizer::normalize(&grey, 1024, true);
    assert_eq!(normalized.dimensions(), (64, 64));
    assert_eq!(normalized.get_pixel(0, 0), &Rgb([128, 128, 128]));

    let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(32, 16, image::Rgba([10, 20, 30, 255])));
    let normalized = normalizer::normalize(&rgba, 1024, true);
    assert_eq!(normalized.dimensions(), (32, 16));
    assert_eq!(normalized.get_pixel(5, 5), &Rgb([10, 20, 30]));
}

#[test]
fn decode_rejects_garbage() {
    let result = normalizer::decode(&[0x00, 0x01, 0x02, 0x03]);
    assert!(matches!(result, Err(PipelineError::InvalidImage(_))));
}

#[test]
fn decode_roundtrips_png_bytes() {
    let src = DynamicImage::ImageRgb8(checker(120, 80));
    let mut bytes = Vec::new();
    src.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();

    let decoded = normalizer::decode(&bytes).unwrap();
    assert_eq!(decoded.width(), 120);
    assert_eq!(decoded.height(), 80);
}

#[test]
fn decode_and_normalize_caps_width() {
    let src = DynamicImage::ImageRgb8(checker(2000, 500));
    let mut bytes = Vec::new();
    src.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();

    let normalized = normalizer::decode_and_normalize(&bytes, 1024, true).unwrap();
    assert_eq!(normalized.dimensions(), (1024, 256));
}
