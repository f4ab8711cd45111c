pub mod nms;
pub mod ort_engine;
pub mod preprocess;
mod yolo;

pub use ort_engine::OrtEngine;
pub use yolo::*;
