/// YOLO family version of the loaded weights. Selects how the raw output
/// tensor is decoded; the network itself stays an opaque artifact.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ModelVersion {
    YoloV5,
    #[default] YoloV8,
    YoloV11,
}

impl ModelVersion {
    pub fn name(&self) -> String {
        match self {
            Self::YoloV5 => "YoloV5".to_string(),
            Self::YoloV8 => "YoloV8".to_string(),
            Self::YoloV11 => "YoloV11".to_string(),
        }
    }

    pub fn from(version: String) -> ModelVersion {
        match version.to_lowercase().as_str() {
            "yolov5" | "v5" => ModelVersion::YoloV5,
            "yolov8" | "v8" => ModelVersion::YoloV8,
            "yolov11" | "v11" => ModelVersion::YoloV11,
            _ => ModelVersion::YoloV8,
        }
    }

    /// Output tensor layout for this version.
    pub fn layout(&self) -> OutputLayout {
        match self {
            // [batch, anchors, 4 + 1 + nc]: cxcywh, objectness, class scores
            Self::YoloV5 => OutputLayout::AnchorsFirstConfClss,
            // [batch, 4 + nc, anchors]: cxcywh, class scores; transposed
            Self::YoloV8 | Self::YoloV11 => OutputLayout::AnchorsLastClss,
        }
    }
}

/// How the prediction rows are laid out in the raw output tensor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutputLayout {
    /// YOLOv5/v6/v7: anchors on axis 0, each row `[cx, cy, w, h, conf, clss..]`.
    AnchorsFirstConfClss,
    /// YOLOv8/v9/v11: anchors on the last axis, rows `[cx, cy, w, h, clss..]`.
    AnchorsLastClss,
}
