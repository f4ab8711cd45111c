use crate::common::inference_device::InferenceDevice;
use crate::common::model_version::ModelVersion;

/// Everything needed to load one detection model: weight/library paths, the
/// execution device, the output layout version and the network input size.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub weights_path: String,
    pub ort_lib_path: String,
    /// Optional labels file, one class label per line. Only consulted when
    /// neither `class_names` nor the ONNX metadata provide names.
    pub labels_path: Option<String>,
    /// Explicit class names, overriding anything parsed from the model.
    pub class_names: Option<Vec<String>>,
    pub inference_device: InferenceDevice,
    pub model_version: ModelVersion,
    /// Network input resolution. Used for letterboxing; overridden by the
    /// session's own input shape when the model declares a static one.
    pub width: u32,
    pub height: u32,
    /// Warm-up inferences run at load time before the first request.
    pub num_dry_run: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            weights_path: String::new(),
            ort_lib_path: String::new(),
            labels_path: None,
            class_names: None,
            inference_device: InferenceDevice::CPU,
            model_version: ModelVersion::default(),
            width: 640,
            height: 640,
            num_dry_run: 1,
        }
    }
}

#[allow(dead_code)]
impl ModelConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_weights(mut self, weights_path: &str) -> Self {
        self.weights_path = weights_path.to_string();
        self
    }

    pub fn with_ort_lib_path(mut self, ort_lib_path: &str) -> Self {
        self.ort_lib_path = ort_lib_path.to_string();
        self
    }

    pub fn with_labels_path(mut self, labels_path: &str) -> Self {
        self.labels_path = Some(labels_path.to_string());
        self
    }

    pub fn with_class_names(mut self, names: &[&str]) -> Self {
        self.class_names = Some(names.iter().map(|x| x.to_string()).collect());
        self
    }

    pub fn with_device(mut self, device: InferenceDevice) -> Self {
        self.inference_device = device;
        self
    }

    pub fn with_model_version(mut self, version: ModelVersion) -> Self {
        self.model_version = version;
        self
    }

    pub fn with_input_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_dry_run(mut self, n: usize) -> Self {
        self.num_dry_run = n;
        self
    }

    pub fn summary(&self) -> String {
        format!("Weights File Path: {}\n\
        OnnxRuntime Lib Path: {}\n\
        Inference Device: {:?}\n\
        Model Version: {:?}\n\
        Model Input Resolution: {}x{}",
                self.weights_path, self.ort_lib_path,
                self.inference_device, self.model_version,
                self.width, self.height)
    }
}
