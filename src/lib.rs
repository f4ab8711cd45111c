//! Leaf disease detection and reporting pipeline.
//!
//! One synchronous run per uploaded photo: normalize (orientation, RGB8,
//! width cap) → detect (YOLO on ONNX Runtime) → annotate → report
//! (confidence tiers, knowledge lookups, overall conclusion).

pub mod annotate;
pub mod common;
pub mod detector;
pub mod error;
pub mod knowledge;
pub mod normalizer;
pub mod report;
mod utils;

use std::time::Instant;

use image::DynamicImage;

use crate::annotate::Annotator;
use crate::common::{ClassCatalog, ModelConfig, PipelineConfig};
use crate::detector::LeafDetector;
use crate::error::PipelineError;
use crate::knowledge::KnowledgeBase;
use crate::report::{build_report, Report};

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

/// The detection pipeline as an explicitly constructed service object:
/// built once at process start with a loaded model, then passed by reference
/// into each request. Holds no global state.
///
/// `process` takes `&mut self` because one pipeline instance serves one
/// request at a time; construct one per worker if the host ever handles
/// requests concurrently.
pub struct LeafPipeline {
    detector: LeafDetector,
    annotator: Annotator,
    knowledge: KnowledgeBase,
    config: PipelineConfig,
}

impl LeafPipeline {
    /// Loads the model and assembles the pipeline. A model that cannot be
    /// loaded means detection is unavailable: no pipeline is constructed and
    /// the caller must treat the feature as disabled.
    pub fn new(model: &ModelConfig, config: PipelineConfig) -> Result<Self> {
        config.validate().map_err(PipelineError::InvalidConfig)?;

        let annotator = match &config.font_path {
            Some(path) => match Annotator::with_font_path(path) {
                Ok(annotator) => annotator,
                Err(err) => {
                    log::warn!("Failed to load caption font: {err}; drawing boxes without text");
                    Annotator::new()
                }
            },
            None => Annotator::new(),
        };

        let detector = LeafDetector::new(model)?;
        log::info!("Detection pipeline ready\n{}", model.summary());

        Ok(Self {
            detector,
            annotator,
            knowledge: KnowledgeBase::new(),
            config,
        })
    }

    pub fn catalog(&self) -> &ClassCatalog {
        self.detector.catalog()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs one full detection-and-reporting pass on an already-decoded
    /// raster.
    pub fn process(&mut self, image: &DynamicImage) -> Result<Report> {
        let now = Instant::now();

        let normalized =
            normalizer::normalize(image, self.config.max_width, self.config.resize_enabled);
        let detections = self.detector.detect(
            &normalized,
            self.config.confidence_threshold,
            self.config.iou_threshold,
        )?;
        let annotated = self
            .annotator
            .annotate(&normalized, &detections, self.detector.catalog());
        let report = build_report(
            &detections,
            self.detector.catalog(),
            &self.knowledge,
            self.config.detail_mode,
            self.config.no_detection_verdict,
            annotated,
        );

        log::debug!(
            "Processed request in {:?}: {} findings, conclusion {:?}",
            now.elapsed(),
            report.findings.len(),
            report.conclusion
        );
        Ok(report)
    }

    /// Decodes an uploaded byte buffer and runs the pipeline on it.
    pub fn process_bytes(&mut self, bytes: &[u8]) -> Result<Report> {
        let image = normalizer::decode(bytes)?;
        self.process(&image)
    }
}
