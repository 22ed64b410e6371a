use std::time::Duration;

use proctoring_core::models::emotion::{EmotionClassifier, EmotionScores};
use proctoring_core::models::face::{FaceAnalyzer, FaceBox, FaceObservations};
use proctoring_core::models::object::{Detection, ObjectDetector};
use proctoring_core::{Frame, ModelError};

use super::fixtures;

/// Face backend that returns the same observations for every frame.
pub struct ScriptedFaces {
    pub observations: FaceObservations,
}

impl ScriptedFaces {
    pub fn none() -> Self {
        Self {
            observations: FaceObservations::default(),
        }
    }

    pub fn count(n: usize) -> Self {
        let boxes = (0..n)
            .map(|i| FaceBox {
                x: 40.0 * i as f64,
                y: 20.0,
                width: 32.0,
                height: 32.0,
                confidence: 0.95,
            })
            .collect();
        Self {
            observations: FaceObservations {
                boxes,
                landmark_sets: Vec::new(),
            },
        }
    }

    /// `n` faces, every iris sitting at the given corner-to-corner ratio.
    pub fn with_gaze(n: usize, iris_ratio: f64) -> Self {
        let mut scripted = Self::count(n);
        scripted.observations.landmark_sets = vec![fixtures::landmarks_with_ratio(iris_ratio); n];
        scripted
    }
}

impl FaceAnalyzer for ScriptedFaces {
    fn detect(&self, _frame: &Frame) -> Result<FaceObservations, ModelError> {
        Ok(self.observations.clone())
    }
}

pub struct FailingFaces;

impl FaceAnalyzer for FailingFaces {
    fn detect(&self, _frame: &Frame) -> Result<FaceObservations, ModelError> {
        Err(ModelError::Inference("face backend crashed".to_string()))
    }
}

/// Sleeps for the given duration before answering, to trip timeouts.
pub struct SlowFaces(pub Duration);

impl FaceAnalyzer for SlowFaces {
    fn detect(&self, _frame: &Frame) -> Result<FaceObservations, ModelError> {
        std::thread::sleep(self.0);
        Ok(FaceObservations::default())
    }
}

pub struct ScriptedObjects(pub Vec<Detection>);

impl ScriptedObjects {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn one(label: &str, confidence: f64) -> Self {
        Self(vec![Detection {
            label: label.to_string(),
            confidence,
        }])
    }
}

impl ObjectDetector for ScriptedObjects {
    fn detect(&self, _frame: &Frame) -> Result<Vec<Detection>, ModelError> {
        Ok(self.0.clone())
    }
}

pub struct FailingObjects;

impl ObjectDetector for FailingObjects {
    fn detect(&self, _frame: &Frame) -> Result<Vec<Detection>, ModelError> {
        Err(ModelError::Inference("object backend crashed".to_string()))
    }
}

pub struct ScriptedEmotion(pub EmotionScores);

impl ScriptedEmotion {
    pub fn of(pairs: &[(&str, f64)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(label, score)| (label.to_string(), *score))
                .collect(),
        )
    }
}

impl EmotionClassifier for ScriptedEmotion {
    fn classify(&self, _frame: &Frame) -> Result<EmotionScores, ModelError> {
        Ok(self.0.clone())
    }
}

pub struct FailingEmotion;

impl EmotionClassifier for FailingEmotion {
    fn classify(&self, _frame: &Frame) -> Result<EmotionScores, ModelError> {
        Err(ModelError::Unavailable)
    }
}
