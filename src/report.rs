//! Turns raw detections into the user-facing report: resolved labels,
//! confidence tiers, knowledge text, an overall conclusion and any recovered
//! contract violations as warnings.

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::common::{BBox, ClassCatalog, Detection, DetailMode, NoDetectionVerdict};
use crate::knowledge::{KnowledgeBase, NO_INFO};

/// Coarse confidence bucket for user-facing display. Lower bounds are
/// inclusive: exactly 75% is High, exactly 50% is Medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn from_percent(percent: f32) -> Self {
        if percent >= 75.0 {
            ConfidenceTier::High
        } else if percent >= 50.0 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }
}

/// The report's overall verdict.
///
/// `NoFindings` is distinct from `Healthy`: every detection was dropped as an
/// unknown class (or the no-detection policy asked for it), which points at a
/// catalog/model mismatch rather than a clean leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Conclusion {
    Healthy,
    Diseased,
    NoFindings,
}

/// Recoverable contract violations absorbed into the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Warning {
    /// A detection's class id was not present in the catalog; the finding
    /// was dropped and processing continued.
    UnknownClass { class_id: usize, confidence: f32 },
}

/// One resolved, human-presentable detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub label: String,
    pub confidence: f32,
    pub confidence_percent: f32,
    pub tier: ConfidenceTier,
    pub bbox: BBox,
    pub description: String,
    pub treatment: String,
}

/// Aggregate result of one detection run. Created per request, discarded
/// after presentation.
#[derive(Debug, Clone)]
pub struct Report {
    pub annotated: RgbImage,
    pub findings: Vec<Finding>,
    pub conclusion: Conclusion,
    pub warnings: Vec<Warning>,
}

#[derive(Serialize)]
struct ReportSummary<'a> {
    findings: &'a [Finding],
    conclusion: Conclusion,
    warnings: &'a [Warning],
}

impl Report {
    /// Findings, conclusion and warnings as JSON for presentation layers.
    /// The annotated image travels separately.
    pub fn summary_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&ReportSummary {
            findings: &self.findings,
            conclusion: self.conclusion,
            warnings: &self.warnings,
        })
    }
}

/// Builds the report from one inference's detections, in the adapter's
/// return order.
///
/// Detections whose class id misses the catalog are dropped individually,
/// logged and recorded as warnings; labels without a knowledge entry get
/// placeholder text instead of failing.
pub fn build_report(
    detections: &[Detection],
    catalog: &ClassCatalog,
    knowledge: &KnowledgeBase,
    detail_mode: DetailMode,
    no_detection_verdict: NoDetectionVerdict,
    annotated: RgbImage,
) -> Report {
    if detections.is_empty() {
        let conclusion = match no_detection_verdict {
            NoDetectionVerdict::Healthy => Conclusion::Healthy,
            NoDetectionVerdict::NoFindings => Conclusion::NoFindings,
        };
        return Report {
            annotated,
            findings: Vec::new(),
            conclusion,
            warnings: Vec::new(),
        };
    }

    let mut findings = Vec::with_capacity(detections.len());
    let mut warnings = Vec::new();

    for det in detections {
        let label = match catalog.label(det.class_id) {
            Some(label) => label,
            None => {
                log::warn!(
                    "Dropping detection with unknown class id {} (confidence {:.2}); \
                     catalog/model version mismatch?",
                    det.class_id,
                    det.confidence
                );
                warnings.push(Warning::UnknownClass {
                    class_id: det.class_id,
                    confidence: det.confidence,
                });
                continue;
            }
        };

        let confidence_percent = det.confidence * 100.0;
        let tier = ConfidenceTier::from_percent(confidence_percent);
        let info = knowledge.lookup(label).unwrap_or(&NO_INFO);

        findings.push(Finding {
            label: label.to_string(),
            confidence: det.confidence,
            confidence_percent,
            tier,
            bbox: det.bbox,
            description: info.description.to_string(),
            treatment: info.treatment.to_string(),
        });
    }

    if detail_mode == DetailMode::SummaryByLabel {
        findings = summarize_by_label(findings);
    }

    let conclusion = if findings.is_empty() {
        Conclusion::NoFindings
    } else if findings.iter().any(|f| !knowledge.is_healthy(&f.label)) {
        Conclusion::Diseased
    } else {
        Conclusion::Healthy
    };

    Report {
        annotated,
        findings,
        conclusion,
        warnings,
    }
}

/// One finding per distinct label: the highest-confidence region represents
/// the label, order of first occurrence is preserved.
fn summarize_by_label(findings: Vec<Finding>) -> Vec<Finding> {
    let mut out: Vec<Finding> = Vec::new();
    for finding in findings {
        match out.iter_mut().find(|f| f.label == finding.label) {
            Some(existing) => {
                if finding.confidence > existing.confidence {
                    *existing = finding;
                }
            }
            None => out.push(finding),
        }
    }
    out
}
