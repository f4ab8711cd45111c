//! Tensor preprocessing for the network input: letterbox to the model
//! resolution, normalize to `[0, 1]` and lay out as NCHW f32.

use anyhow::{bail, Result};
use fast_image_resize::{
    images::{CroppedImageMut, Image as FirImage},
    pixels::PixelType,
    ResizeAlg, ResizeOptions, Resizer,
};
use image::RgbImage;
use ndarray::{Array, Ix4};

/// Scale factor and source dimensions of a letterboxed input, needed to map
/// network coordinates back to source pixel space.
#[derive(Debug, Clone, Copy)]
pub struct LetterboxInfo {
    pub src_width: u32,
    pub src_height: u32,
    /// min(target_w / src_w, target_h / src_h); content is top-left anchored.
    pub scale: f32,
}

pub fn to_fir_image<'a>(mut image: RgbImage) -> FirImage<'a> {
    let (width, height) = image.dimensions();
    let buffer = std::mem::take(&mut image).into_raw();

    FirImage::from_vec_u8(width, height, buffer, PixelType::U8x3)
        .expect("RGB8 buffer length matches dimensions")
}

/// Letterboxes `image` onto a `target_w` x `target_h` canvas (top-left
/// anchored, padded with `bg`) and returns the NCHW-normalized batch tensor
/// together with the mapping info.
pub fn letterbox_to_tensor(
    image: &RgbImage,
    target_h: u32,
    target_w: u32,
    bg: u8,
) -> Result<(Array<f32, Ix4>, LetterboxInfo)> {
    let (w0, h0) = image.dimensions();
    let scale = (target_w as f32 / w0 as f32).min(target_h as f32 / h0 as f32);
    let new_w = ((w0 as f32 * scale).round() as u32).clamp(1, target_w);
    let new_h = ((h0 as f32 * scale).round() as u32).clamp(1, target_h);

    let src = to_fir_image(image.clone());
    let mut padded = FirImage::from_vec_u8(
        target_w,
        target_h,
        vec![bg; (target_w * target_h * 3) as usize],
        PixelType::U8x3,
    )?;

    let mut resizer = Resizer::new();
    let options = ResizeOptions::new().resize_alg(ResizeAlg::Nearest);
    let mut cropped = CroppedImageMut::new(&mut padded, 0, 0, new_w, new_h)?;
    resizer.resize(&src, &mut cropped, &options)?;

    let flat = nchw_normalize_flat(&padded)?;
    let tensor = Array::from_shape_vec((1, 3, target_h as usize, target_w as usize), flat)?;

    Ok((
        tensor,
        LetterboxInfo {
            src_width: w0,
            src_height: h0,
            scale,
        },
    ))
}

fn nchw_normalize_flat(img: &FirImage) -> Result<Vec<f32>> {
    let buf = img.buffer();
    let w = img.width() as usize;
    let h = img.height() as usize;

    if buf.len() != w * h * 3 {
        bail!("Unexpected buffer size: got {}, expected {}", buf.len(), w * h * 3);
    }

    let mut out = vec![0.0f32; buf.len()];
    let hw = w * h;

    for i in 0..hw {
        let r = buf[3 * i];
        let g = buf[3 * i + 1];
        let b = buf[3 * i + 2];

        out[i] = r as f32 / 255.0;
        out[i + hw] = g as f32 / 255.0;
        out[i + 2 * hw] = b as f32 / 255.0;
    }

    Ok(out)
}
