use serde::{Deserialize, Serialize};

/// How findings are emitted for multiple regions of the same class.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailMode {
    /// One finding per detected region, duplicates kept.
    #[default] PerRegion,
    /// One finding per distinct label; the highest-confidence region
    /// represents the label, emission order is first occurrence.
    SummaryByLabel,
}

/// Verdict reported when the detector returns no detections at all.
///
/// Treating an empty result as healthy assumes the detector always fires on
/// any visible disease pattern at the configured threshold. Deployments that
/// do not want to conflate "no disease" with "detector did not fire" can
/// select `NoFindings` instead.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoDetectionVerdict {
    #[default] Healthy,
    NoFindings,
}

/// Per-request policy knobs for the detection pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Minimum confidence for a detection to be returned. Domain `(0, 1]`;
    /// the recommended operating range exposed to users is `[0.2, 0.7]`.
    pub confidence_threshold: f32,
    /// IoU above which overlapping boxes are suppressed.
    pub iou_threshold: f32,
    /// Cap the input width at `max_width`, preserving aspect ratio.
    pub resize_enabled: bool,
    pub max_width: u32,
    pub detail_mode: DetailMode,
    pub no_detection_verdict: NoDetectionVerdict,
    /// Optional TrueType/OpenType font for box captions. Boxes are drawn
    /// without caption text when unset.
    pub font_path: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.35,
            iou_threshold: 0.45,
            resize_enabled: true,
            max_width: 1024,
            detail_mode: DetailMode::PerRegion,
            no_detection_verdict: NoDetectionVerdict::Healthy,
            font_path: None,
        }
    }
}

#[allow(dead_code)]
impl PipelineConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_confidence_threshold(mut self, x: f32) -> Self {
        self.confidence_threshold = x;
        self
    }

    pub fn with_iou_threshold(mut self, x: f32) -> Self {
        self.iou_threshold = x;
        self
    }

    pub fn with_resize_enabled(mut self, x: bool) -> Self {
        self.resize_enabled = x;
        self
    }

    pub fn with_max_width(mut self, x: u32) -> Self {
        self.max_width = x;
        self
    }

    pub fn with_detail_mode(mut self, x: DetailMode) -> Self {
        self.detail_mode = x;
        self
    }

    pub fn with_no_detection_verdict(mut self, x: NoDetectionVerdict) -> Self {
        self.no_detection_verdict = x;
        self
    }

    pub fn with_font_path(mut self, path: &str) -> Self {
        self.font_path = Some(path.to_string());
        self
    }

    /// Checks the threshold domains. Run once at pipeline construction.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.confidence_threshold > 0.0 && self.confidence_threshold <= 1.0) {
            return Err(format!(
                "confidence_threshold must be in (0, 1], got {}",
                self.confidence_threshold
            ));
        }
        if !(self.iou_threshold > 0.0 && self.iou_threshold <= 1.0) {
            return Err(format!(
                "iou_threshold must be in (0, 1], got {}",
                self.iou_threshold
            ));
        }
        if self.resize_enabled && self.max_width == 0 {
            return Err("max_width must be non-zero when resizing is enabled".to_string());
        }
        Ok(())
    }
}
