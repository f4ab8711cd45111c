//! Renders detections onto the normalized image: per-class coloured boxes
//! with a caption strip. Display output only; nothing downstream parses it.

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

use crate::common::{ClassCatalog, Detection};
use crate::knowledge::Disease;

const LABEL_FONT_SIZE: f32 = 20.0;
const LABEL_TEXT_HEIGHT: i32 = 24;
const LABEL_CHAR_WIDTH: f32 = 11.0; // rough per-character width estimate
const LABEL_TEXT_VERTICAL_PADDING: i32 = 2;
const BORDER_THICKNESS: i32 = 2;

pub(crate) fn class_colour(label: Option<&str>) -> Rgb<u8> {
    match label.and_then(Disease::from_label) {
        Some(Disease::Healthy) => Rgb([0, 170, 0]),
        Some(Disease::LeafMiner) => Rgb([255, 140, 0]),
        Some(Disease::RedRust) => Rgb([220, 20, 20]),
        None => Rgb([0, 0, 255]), // undocumented classes
    }
}

pub struct Annotator {
    font: Option<FontVec>,
    font_size: f32,
    label_text_height: i32,
    label_char_width: f32,
    label_text_vertical_padding: i32,
}

impl Default for Annotator {
    fn default() -> Self {
        Self {
            font: None,
            font_size: LABEL_FONT_SIZE,
            label_text_height: LABEL_TEXT_HEIGHT,
            label_char_width: LABEL_CHAR_WIDTH,
            label_text_vertical_padding: LABEL_TEXT_VERTICAL_PADDING,
        }
    }
}

impl Annotator {
    pub fn new() -> Self {
        Default::default()
    }

    /// Loads a TrueType/OpenType font for caption text. Without a font, boxes
    /// and caption backgrounds are still drawn, just no text.
    pub fn with_font_path(path: &str) -> anyhow::Result<Self> {
        let data = std::fs::read(path)?;
        let font = FontVec::try_from_vec(data)
            .map_err(|err| anyhow::anyhow!("failed to parse font {path}: {err:?}"))?;
        Ok(Self {
            font: Some(font),
            ..Default::default()
        })
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Draws every detection onto a copy of `image`.
    pub fn annotate(
        &self,
        image: &RgbImage,
        detections: &[Detection],
        catalog: &ClassCatalog,
    ) -> RgbImage {
        let mut img = image.clone();
        for det in detections {
            let label = catalog.label(det.class_id);
            let colour = class_colour(label);
            self.draw_bbox_with_caption(&mut img, det, label.unwrap_or("unknown"), colour);
        }
        img
    }

    fn draw_bbox_with_caption(
        &self,
        image: &mut RgbImage,
        det: &Detection,
        label: &str,
        colour: Rgb<u8>,
    ) {
        let (img_w, img_h) = (image.width() as i32, image.height() as i32);

        let (x1, y1, x2, y2) = det.bbox.xy1_xy2();
        let x1 = (x1.floor() as i32).clamp(0, img_w - 1);
        let y1 = (y1.floor() as i32).clamp(0, img_h - 1);
        let x2 = (x2.ceil() as i32).clamp(0, img_w - 1);
        let y2 = (y2.ceil() as i32).clamp(0, img_h - 1);

        if x1 >= x2 || y1 >= y2 {
            return;
        }

        for t in 0..BORDER_THICKNESS {
            let w = (x2 - x1 - 2 * t).max(1) as u32;
            let h = (y2 - y1 - 2 * t).max(1) as u32;
            draw_hollow_rect_mut(image, Rect::at(x1 + t, y1 + t).of_size(w, h), colour);
        }

        let caption = format!("{} {:.2}", label, det.confidence);

        let text_width = (caption.len() as f32 * self.label_char_width) as i32;
        let text_height = self.label_text_height;

        // caption strip sits above the box, clamped inside the image
        let label_x = x1.max(0);
        let label_y = (y1 - text_height).max(0);
        let max_width = (img_w - label_x).max(0);
        let label_width = text_width.min(max_width) as u32;
        let label_height = text_height as u32;

        if label_width == 0 || label_height == 0 {
            return;
        }

        let rect = Rect::at(label_x, label_y).of_size(label_width, label_height);
        draw_filled_rect_mut(image, rect, colour);

        if let Some(font) = &self.font {
            let scale = PxScale::from(self.font_size);
            let text_colour = Rgb([255u8, 255u8, 255u8]);
            draw_text_mut(
                image,
                text_colour,
                label_x,
                label_y + self.label_text_vertical_padding,
                scale,
                font,
                &caption,
            );
        }
    }
}
