//! Model backend seams.
//!
//! The engine never talks to an inference runtime directly. Each vision or
//! classification backend sits behind one of these traits, constructed once
//! at startup and shared through an `Arc`. Backends report failures as
//! [`crate::error::ModelError`]; the engine translates those into
//! degradation markers instead of surfacing them to callers.

pub mod emotion;
pub mod face;
pub mod object;

pub use emotion::{EmotionClassifier, EmotionScores};
pub use face::{
    EyeLandmarks, EyeTopology, FaceAnalyzer, FaceBox, FaceObservations, LandmarkSet,
    REFINED_MESH_478,
};
pub use object::{Detection, ObjectDetector};
