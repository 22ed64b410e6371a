//! Object detection seam for restricted-item checks.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::frame::Frame;

/// One detected object with its class label and score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub label: String,
    pub confidence: f64,
}

/// Object detection backend.
pub trait ObjectDetector: Send + Sync {
    fn detect(&self, frame: &Frame) -> Result<Vec<Detection>, ModelError>;
}

/// True when any detection matches the restricted label strictly above the
/// confidence floor.
pub fn contains_restricted(detections: &[Detection], label: &str, min_confidence: f64) -> bool {
    detections
        .iter()
        .any(|d| d.label == label && d.confidence > min_confidence)
}
