//! The detector adapter: wraps the ONNX session behind the uniform
//! `detect(image, confidence_threshold) -> detections` contract, decoding
//! YOLO-family output tensors into pixel-space [`Detection`]s.

use image::{Rgb, RgbImage};
use ndarray::{Array, Axis, IxDyn};
use rayon::prelude::*;
use regex::Regex;

use crate::common::{BBox, ClassCatalog, Detection, ModelConfig, ModelVersion, OutputLayout};
use crate::detector::nms::nms;
use crate::detector::ort_engine::OrtEngine;
use crate::detector::preprocess::{letterbox_to_tensor, LetterboxInfo};
use crate::error::PipelineError;
use crate::utils;

const LETTERBOX_BG: u8 = 114;
const WARMUP_THRESHOLD: f32 = 0.5;

pub struct LeafDetector {
    engine: OrtEngine,
    catalog: ClassCatalog,
    version: ModelVersion,
}

impl LeafDetector {
    /// Loads the model and resolves the class catalog. Runs
    /// `config.num_dry_run` warm-up inferences so the first request does not
    /// pay session initialization costs. Any failure here means detection is
    /// unavailable and the pipeline must not be constructed.
    pub fn new(config: &ModelConfig) -> Result<Self, PipelineError> {
        let engine = OrtEngine::new(config)
            .map_err(|err| PipelineError::ModelUnavailable(err.to_string()))?;

        let names = Self::resolve_names(config, &engine)
            .map_err(|err| PipelineError::ModelUnavailable(err.to_string()))?;
        let catalog = ClassCatalog::new(&names);
        log::info!("Class catalog: {} classes {:?}", catalog.len(), catalog.labels());

        let mut detector = Self {
            engine,
            catalog,
            version: config.model_version,
        };

        let blank = RgbImage::from_pixel(
            detector.engine.model_width().max(1),
            detector.engine.model_height().max(1),
            Rgb([LETTERBOX_BG; 3]),
        );
        for _ in 0..config.num_dry_run {
            detector
                .detect(&blank, WARMUP_THRESHOLD, 0.45)
                .map_err(|err| {
                    PipelineError::ModelUnavailable(format!("warm-up inference failed: {err}"))
                })?;
        }

        Ok(detector)
    }

    /// The loaded model's id → label mapping, stable for this detector's
    /// lifetime.
    pub fn catalog(&self) -> &ClassCatalog {
        &self.catalog
    }

    /// Runs one synchronous inference. Only detections at or above
    /// `confidence_threshold` are returned, overlapping boxes are suppressed
    /// at `iou_threshold`, and boxes are mapped back to the pixel space of
    /// `image` and clamped to its bounds. The returned order (descending
    /// confidence) is the adapter's contract and is not re-sorted downstream.
    pub fn detect(
        &mut self,
        image: &RgbImage,
        confidence_threshold: f32,
        iou_threshold: f32,
    ) -> Result<Vec<Detection>, PipelineError> {
        let (tensor, info) = letterbox_to_tensor(
            image,
            self.engine.model_height(),
            self.engine.model_width(),
            LETTERBOX_BG,
        )
        .map_err(|err| PipelineError::Inference(err.to_string()))?;

        let output = self
            .engine
            .run(tensor)
            .map_err(|err| PipelineError::Inference(err.to_string()))?;

        let mut detections =
            decode_outputs(&output, self.version.layout(), &info, confidence_threshold);
        nms(&mut detections, iou_threshold);

        log::debug!(
            "Detected {} objects (threshold {confidence_threshold})",
            detections.len()
        );
        Ok(detections)
    }

    // Class names: user-defined.or(parsed).or(labels file)
    fn resolve_names(config: &ModelConfig, engine: &OrtEngine) -> anyhow::Result<Vec<String>> {
        if let Some(names) = &config.class_names {
            return Ok(names.clone());
        }
        if let Some(names) = Self::fetch_names(engine) {
            if !names.is_empty() {
                return Ok(names);
            }
        }
        if let Some(path) = &config.labels_path {
            return Ok(utils::file_to_vec(path)?);
        }
        anyhow::bail!(
            "unable to determine class names; set class_names, labels_path, \
             or use a model with a `names` metadata entry"
        )
    }

    fn fetch_names(engine: &OrtEngine) -> Option<Vec<String>> {
        // fetch class names from onnx metadata
        // String format: `{0: 'healthy', 1: 'leaf miner', 2: 'red rust'}`
        engine.try_fetch("names").map(|names| {
            let re = Regex::new(r#"(['"])([-()\w '"]+)(['"])"#).unwrap();
            let mut names_ = vec![];
            for (_, [_, name, _]) in re.captures_iter(&names).map(|x| x.extract()) {
                names_.push(name.to_string());
            }
            names_
        })
    }
}

/// Decodes a raw YOLO output tensor (batch size 1) into pixel-space
/// detections, filtering below `confidence_threshold`. NMS is the caller's
/// concern.
pub fn decode_outputs(
    output: &Array<f32, IxDyn>,
    layout: OutputLayout,
    info: &LetterboxInfo,
    confidence_threshold: f32,
) -> Vec<Detection> {
    if output.ndim() != 3 || output.shape()[0] == 0 {
        return Vec::new();
    }

    let preds = output.index_axis(Axis(0), 0);
    let preds = match layout {
        // [4 + nc, anchors] -> [anchors, 4 + nc]
        OutputLayout::AnchorsLastClss => preds.reversed_axes(),
        OutputLayout::AnchorsFirstConfClss => preds,
    };

    let scale = info.scale;
    let (src_w, src_h) = (info.src_width as f32, info.src_height as f32);

    preds
        .axis_iter(Axis(0))
        .into_par_iter()
        .filter_map(|row| {
            let head: Vec<f32> = row.iter().take(5).copied().collect();
            if head.len() < 5 {
                return None;
            }

            let (class_id, confidence) = match layout {
                OutputLayout::AnchorsLastClss => {
                    let (class_id, &score) = row
                        .iter()
                        .skip(4)
                        .enumerate()
                        .max_by(|a, b| a.1.total_cmp(b.1))?;
                    (class_id, score)
                }
                OutputLayout::AnchorsFirstConfClss => {
                    let objectness = head[4];
                    let (class_id, &score) = row
                        .iter()
                        .skip(5)
                        .enumerate()
                        .max_by(|a, b| a.1.total_cmp(b.1))?;
                    (class_id, objectness * score)
                }
            };

            // filtering low scores
            if confidence < confidence_threshold {
                return None;
            }

            let (cx, cy, w, h) = (head[0], head[1], head[2], head[3]);
            let bbox = BBox::default()
                .with_cxcy_wh(cx / scale, cy / scale, w / scale, h / scale)
                .clamp(src_w, src_h);

            Some(Detection::new(class_id, bbox, confidence))
        })
        .collect()
}
