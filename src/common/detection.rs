use serde::{Deserialize, Serialize};
use crate::common::BBox;
use crate::detector::nms::Nms;

/// One candidate region from the detector: a class id, a confidence score in
/// `[0, 1]` and a bounding box in the pixel space of the image that was
/// submitted for inference. Produced once per inference call, never mutated
/// afterwards.
#[derive(Default, Debug, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Detection {
    pub class_id: usize,
    pub bbox: BBox,
    pub confidence: f32,
}

impl Nms for Detection {
    /// Computes the intersection over union (IoU) between this detection and another.
    fn iou(&self, other: &Self) -> f32 {
        self.bbox.intersect(&other.bbox) / self.bbox.union(&other.bbox)
    }

    fn confidence(&self) -> f32 {
        self.confidence
    }
}

impl Detection {
    pub fn new(class_id: usize, bbox: BBox, confidence: f32) -> Self {
        Self {
            class_id,
            bbox,
            confidence,
        }
    }

    /// Sets the bounding box's coordinates using `(x1, y1, x2, y2)`.
    pub fn with_x1y1_x2y2(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.bbox = BBox::default().with_x1y1_x2y2(x1, y1, x2, y2);
        self
    }

    /// Sets the bounding box's coordinates and dimensions using `(cx, cy, w, h)`.
    pub fn with_cxcy_wh(mut self, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        self.bbox = BBox::default().with_cxcy_wh(cx, cy, w, h);
        self
    }

    /// Sets the confidence score of the detection.
    pub fn with_confidence(mut self, conf: f32) -> Self {
        self.confidence = conf;
        self
    }

    /// Sets the class ID of the detection.
    pub fn with_class_id(mut self, class_id: usize) -> Self {
        self.class_id = class_id;
        self
    }
}
