pub trait Nms {
    /// Computes the intersection over union (IoU) between this box and another.
    fn iou(&self, other: &Self) -> f32;

    /// Returns the confidence score of the box.
    fn confidence(&self) -> f32;
}

/// Class-agnostic non-maximum suppression. Sorts by descending confidence and
/// drops any box whose IoU with an already-kept box exceeds `iou_threshold`.
pub fn nms<T: Nms>(boxes: &mut Vec<T>, iou_threshold: f32) {
    boxes.sort_by(|b1, b2| {
        b2.confidence()
            .partial_cmp(&b1.confidence())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let mut current_index = 0;
    for index in 0..boxes.len() {
        let mut drop = false;
        for prev_index in 0..current_index {
            let iou = boxes[prev_index].iou(&boxes[index]);
            if iou > iou_threshold {
                drop = true;
                break;
            }
        }
        if !drop {
            boxes.swap(current_index, index);
            current_index += 1;
        }
    }
    boxes.truncate(current_index);
}
