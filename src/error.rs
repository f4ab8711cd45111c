use thiserror::Error;

/// Fatal pipeline failures. Recoverable conditions (an unknown class id, a
/// disease label with no knowledge entry) never surface here; they are
/// absorbed into the [`Report`](crate::report::Report) as warnings or
/// placeholder text.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The detection model could not be loaded or initialized. The pipeline
    /// is never constructed; there is nothing to retry.
    #[error("detection model unavailable: {0}")]
    ModelUnavailable(String),

    /// The uploaded data could not be decoded into an image. Fatal for this
    /// request only; the caller may re-prompt for an upload.
    #[error("invalid image: {0}")]
    InvalidImage(#[from] image::ImageError),

    /// The ONNX Runtime session failed while executing an inference.
    #[error("inference failed: {0}")]
    Inference(String),

    /// A configuration value is outside its domain. Raised once, at pipeline
    /// construction.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<ort::Error> for PipelineError {
    fn from(err: ort::Error) -> Self {
        PipelineError::Inference(err.to_string())
    }
}
