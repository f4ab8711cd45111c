//! Input image normalization: orientation correction, canonical color mode,
//! optional width cap. Everything downstream assumes this module's output.

use std::io::Cursor;

use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader, RgbImage};

use crate::error::PipelineError;

/// Decodes an uploaded byte buffer, applying any embedded EXIF orientation so
/// the pixel data matches the intended visual orientation (phone cameras
/// routinely store rotated pixels plus an orientation tag).
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, PipelineError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?;
    let mut decoder = reader.into_decoder()?;
    let orientation = decoder
        .orientation()
        .unwrap_or(Orientation::NoTransforms);
    let mut image = DynamicImage::from_decoder(decoder)?;
    image.apply_orientation(orientation);
    Ok(image)
}

/// Forces the canonical RGB8 color mode and, when `enabled` and the image is
/// wider than `max_width`, downsamples proportionally so that
/// `new_height = floor(height * max_width / width)`.
///
/// An image already in bounds passes through with unchanged dimensions.
pub fn normalize(image: &DynamicImage, max_width: u32, enabled: bool) -> RgbImage {
    let (width, height) = (image.width(), image.height());

    if !enabled || width <= max_width || max_width == 0 {
        return image.to_rgb8();
    }

    let new_height = ((height as u64 * max_width as u64) / width as u64).max(1) as u32;

    let mut resizer = fast_image_resize::Resizer::new();
    let options = fast_image_resize::ResizeOptions {
        algorithm: fast_image_resize::ResizeAlg::Convolution(
            fast_image_resize::FilterType::Bilinear,
        ),
        ..Default::default()
    };

    let mut resized = DynamicImage::new(max_width, new_height, image.color());
    if let Err(err) = resizer.resize(image, &mut resized, &options) {
        log::warn!("fast_image_resize failed ({err}), falling back to imageops");
        return image::imageops::resize(&image.to_rgb8(), max_width, new_height, FilterType::Nearest);
    }
    resized.to_rgb8()
}

/// Decode + normalize in one step, for callers holding raw upload bytes.
pub fn decode_and_normalize(
    bytes: &[u8],
    max_width: u32,
    enabled: bool,
) -> Result<RgbImage, PipelineError> {
    let image = decode(bytes)?;
    Ok(normalize(&image, max_width, enabled))
}
