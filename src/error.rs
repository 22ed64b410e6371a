//! Error types for the analysis pipeline.
//!
//! Callers only ever see [`AnalysisError`]: malformed input that the engine
//! refuses to analyze. Model backend failures ([`ModelError`]) are absorbed
//! inside the pipeline and surface as degradation markers on an otherwise
//! complete result, never as an `Err`.

use thiserror::Error;

/// Input validation failures visible to callers of the engine.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The frame payload had zero bytes.
    #[error("empty frame payload")]
    EmptyFrame,

    /// The frame payload length does not match its declared dimensions.
    #[error("frame payload of {len} bytes does not match {width}x{height} RGB ({expected} bytes)")]
    FrameGeometry {
        len: usize,
        expected: usize,
        width: u32,
        height: u32,
    },

    /// The audio payload had zero bytes.
    #[error("empty audio payload")]
    EmptyAudio,
}

/// Failures raised by model backends. Absorbed by the engine.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The backend never loaded or is not present on this host.
    #[error("model backend unavailable")]
    Unavailable,

    /// A single inference call failed.
    #[error("inference failed: {0}")]
    Inference(String),
}
