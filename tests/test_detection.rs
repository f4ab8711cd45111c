extern crate leaf_detect;

use std::path::Path;
use std::time::Instant;

use leaf_detect::common::{InferenceDevice, ModelConfig, ModelVersion, PipelineConfig};
use leaf_detect::report::Conclusion;
use leaf_detect::LeafPipeline;

// Requires exported YOLO weights, the ONNX Runtime shared library and a
// sample photo; run with `cargo test -- --ignored` once the paths below exist.
#[test]
#[ignore = "requires model weights and the ONNX Runtime shared library"]
fn detection() {
    /////////////////////
    // Testing variables
    let onnx_path = "../models/cashew/best.onnx";
    let lib_path = "../onnxruntime/linux_x64/libonnxruntime.so";
    let image_path = "tests/leaf_sample.jpg";
    /////////////////////

    let model_details = ModelConfig::new()
        .with_weights(onnx_path)
        .with_ort_lib_path(lib_path)
        .with_class_names(&["healthy", "leaf miner", "red rust"])
        .with_device(InferenceDevice::CPU)
        .with_model_version(ModelVersion::YoloV8)
        .with_input_size(640, 640);

    let mut pipeline = match LeafPipeline::new(&model_details, PipelineConfig::default()) {
        Ok(pipeline) => pipeline,
        Err(err) => panic!("Failed to initialize detection pipeline: {err}"),
    };

    let image = image::open(Path::new(env!("CARGO_MANIFEST_DIR")).join(image_path)).unwrap();

    let now = Instant::now();
    let report = pipeline.process(&image).unwrap();
    println!("TIME | Total={:.2?}", now.elapsed());
    println!("Detected {} regions", report.findings.len());

    for finding in &report.findings {
        println!(
            "{} | {:.2}% ({:?}) | {:?}",
            finding.label, finding.confidence_percent, finding.tier, finding.bbox
        );
        assert!(finding.confidence >= pipeline.config().confidence_threshold);
    }

    assert!(matches!(
        report.conclusion,
        Conclusion::Healthy | Conclusion::Diseased | Conclusion::NoFindings
    ));

    report.annotated.save("tests/test_output.jpg").unwrap();
}
