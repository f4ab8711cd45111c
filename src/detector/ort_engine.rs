//! ONNX Runtime session wrapper: library init, execution provider
//! registration, tensor attribute discovery and raw tensor I/O.

use anyhow::{anyhow, bail, Result};
use half::f16;
use ndarray::{Array, Ix4, IxDyn};
use ort::{
    inputs, CPUExecutionProvider, CUDAExecutionProvider, ExecutionProvider,
    GraphOptimizationLevel, Session, SessionOutputs, TensorElementType, ValueType,
};

use crate::common::{InferenceDevice, ModelConfig, TimeCalc};
use crate::utils::human_bytes;

/// ONNXRuntime backend for a single loaded model.
pub struct OrtEngine {
    session: Session,
    device: InferenceDevice,
    input_name: String,
    input_dims: Vec<i64>,
    output_name: String,
    output_dtype: TensorElementType,
    model_width: u32,
    model_height: u32,
    pub infer_time: TimeCalc,
}

impl OrtEngine {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        // Dynamically load the runtime library from the given path; an empty
        // path defers to ORT_DYLIB_PATH.
        if config.ort_lib_path.is_empty() {
            ort::init().commit()?;
        } else {
            ort::init_from(&config.ort_lib_path).commit()?;
        }

        let builder = Session::builder()?;

        let mut device = config.inference_device;
        match device {
            InferenceDevice::CUDA(device_id) => {
                let ep = CUDAExecutionProvider::default().with_device_id(device_id as i32);
                match ep.register(&builder) {
                    Ok(_) => log::info!("CUDA device successfully registered"),
                    Err(err) => {
                        log::warn!("Failed to register CUDA device: {err}, using CPU");
                        device = InferenceDevice::CPU;
                        Self::register_cpu(&builder)?;
                    }
                }
            }
            InferenceDevice::CPU => {
                Self::register_cpu(&builder)?;
            }
        }

        let session = builder
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_file(&config.weights_path)?;

        let (input_name, input_dims) = match session.inputs.first() {
            Some(input) => match &input.input_type {
                ValueType::Tensor { dimensions, .. } => {
                    (input.name.clone(), dimensions.clone())
                }
                other => bail!("Unsupported model input type: {other:?}"),
            },
            None => bail!("Model declares no inputs"),
        };

        let (output_name, output_dtype) = match session.outputs.first() {
            Some(output) => match &output.output_type {
                ValueType::Tensor { ty, .. } => (output.name.clone(), *ty),
                other => bail!("Unsupported model output type: {other:?}"),
            },
            None => bail!("Model declares no outputs"),
        };

        // Static input shapes win over the configured resolution; dynamic
        // axes (-1) fall back to it.
        let model_height = match input_dims.get(2) {
            Some(&d) if d > 0 => d as u32,
            _ => config.height,
        };
        let model_width = match input_dims.get(3) {
            Some(&d) if d > 0 => d as u32,
            _ => config.width,
        };

        let weights_bytes = std::fs::metadata(&config.weights_path)
            .map(|m| m.len())
            .unwrap_or(0);
        log::info!(
            "Backend: ONNXRuntime | Device: {:?} | Input: {}x{} | Output dtype: {:?} | Weights: {}",
            device,
            model_width,
            model_height,
            output_dtype,
            human_bytes(weights_bytes as f64),
        );

        Ok(Self {
            session,
            device,
            input_name,
            input_dims,
            output_name,
            output_dtype,
            model_width,
            model_height,
            infer_time: TimeCalc::default(),
        })
    }

    fn register_cpu(builder: &ort::SessionBuilder) -> Result<()> {
        let ep = CPUExecutionProvider::default();
        if ep.is_available()? {
            ep.register(builder)
                .map_err(|err| anyhow!("CPU initialization failed: {err:?}"))
        } else {
            bail!("CPU execution provider not available")
        }
    }

    /// Runs one inference on a preprocessed NCHW batch and returns the first
    /// output tensor as f32.
    pub fn run(&mut self, input: Array<f32, Ix4>) -> Result<Array<f32, IxDyn>> {
        let t_run = std::time::Instant::now();
        let outputs: SessionOutputs =
            self.session.run(inputs![self.input_name.as_str() => input.view()]?)?;
        self.infer_time.add_or_push(0, t_run.elapsed());

        let t_post = std::time::Instant::now();
        let output = self.extract_output(&outputs)?;
        self.infer_time.add_or_push(1, t_post.elapsed());

        Ok(output)
    }

    fn extract_output(&self, outputs: &SessionOutputs) -> Result<Array<f32, IxDyn>> {
        let value = &outputs[self.output_name.as_str()];
        let y = match self.output_dtype {
            TensorElementType::Float32 => value.try_extract_tensor::<f32>()?.into_owned(),
            TensorElementType::Float16 => value
                .try_extract_tensor::<f16>()?
                .mapv(f16::to_f32)
                .into_owned(),
            dtype => bail!("Unsupported ort output tensor type: {dtype:?}"),
        };
        Ok(y)
    }

    /// Fetches a custom metadata entry from the loaded model, if present.
    pub fn try_fetch(&self, key: &str) -> Option<String> {
        match self.session.metadata() {
            Err(_) => None,
            Ok(metadata) => metadata.custom(key).unwrap_or_default(),
        }
    }

    pub fn device(&self) -> &InferenceDevice {
        &self.device
    }

    pub fn in_dims(&self) -> &[i64] {
        &self.input_dims
    }

    pub fn model_width(&self) -> u32 {
        self.model_width
    }

    pub fn model_height(&self) -> u32 {
        self.model_height
    }

    pub fn ts(&self) -> &TimeCalc {
        &self.infer_time
    }
}
