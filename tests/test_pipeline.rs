extern crate leaf_detect;

use leaf_detect::common::{DetailMode, ModelConfig, NoDetectionVerdict, PipelineConfig};
use leaf_detect::error::PipelineError;
use leaf_detect::LeafPipeline;

#[test]
fn default_config_matches_documented_defaults() {
    let config = PipelineConfig::default();

    assert!((config.confidence_threshold - 0.35).abs() < 1e-6);
    assert!((config.iou_threshold - 0.45).abs() < 1e-6);
    assert!(config.resize_enabled);
    assert_eq!(config.max_width, 1024);
    assert_eq!(config.detail_mode, DetailMode::PerRegion);
    assert_eq!(config.no_detection_verdict, NoDetectionVerdict::Healthy);
    assert!(config.font_path.is_none());
}

#[test]
fn config_builder_sets_fields() {
    let config = PipelineConfig::new()
        .with_confidence_threshold(0.5)
        .with_resize_enabled(false)
        .with_detail_mode(DetailMode::SummaryByLabel)
        .with_no_detection_verdict(NoDetectionVerdict::NoFindings);

    assert!((config.confidence_threshold - 0.5).abs() < 1e-6);
    assert!(!config.resize_enabled);
    assert_eq!(config.detail_mode, DetailMode::SummaryByLabel);
    assert_eq!(config.no_detection_verdict, NoDetectionVerdict::NoFindings);
}

#[test]
fn out_of_domain_thresholds_are_rejected() {
    assert!(PipelineConfig::new().with_confidence_threshold(0.0).validate().is_err());
    assert!(PipelineConfig::new().with_confidence_threshold(-0.2).validate().is_err());
    assert!(PipelineConfig::new().with_confidence_threshold(1.5).validate().is_err());
    assert!(PipelineConfig::new().with_iou_threshold(0.0).validate().is_err());
    assert!(PipelineConfig::new().with_max_width(0).validate().is_err());

    assert!(PipelineConfig::new().with_confidence_threshold(1.0).validate().is_ok());
    assert!(PipelineConfig::new().with_confidence_threshold(0.35).validate().is_ok());
}

#[test]
fn pipeline_construction_rejects_invalid_config_before_model_load() {
    let model = ModelConfig::default();
    let config = PipelineConfig::new().with_confidence_threshold(2.0);

    let err = match LeafPipeline::new(&model, config) {
        Ok(_) => panic!("expected construction to fail"),
        Err(err) => err,
    };
    match err {
        PipelineError::InvalidConfig(msg) => assert!(msg.contains("confidence_threshold")),
        other => panic!("expected InvalidConfig, got {other}"),
    }
}
