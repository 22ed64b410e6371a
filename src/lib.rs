//! Core analysis pipeline for AI-proctored interview sessions.
//!
//! The crate takes decoded video frames and encoded audio clips and turns
//! them into proctoring signals: face presence and count, gaze direction,
//! restricted-object hits, emotion-derived stress and confidence, voice
//! features, and ambient noise estimates. [`ProctorEngine`] composes the
//! per-frame checks into a violation list with an integrity sub-score;
//! [`SessionAggregator`] folds frame violations into session-level scores.
//!
//! Model backends (face, object, emotion) sit behind traits in [`models`]
//! and are injected at engine construction. The pipeline never fails a
//! frame because a model failed: internal errors substitute fully-formed
//! neutral defaults and record a [`Degradation`] so telemetry can see
//! every defaulted path. The only errors callers observe are structural
//! input problems ([`AnalysisError`]).

pub mod analysis;
pub mod audio;
pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod logging;
pub mod models;

pub use analysis::engine::ProctorEngine;
pub use analysis::session::{SessionAggregator, SessionSummary, ViolationEvent};
pub use analysis::types::{
    Analysis, AudioQuality, AudioQualityResult, DegradeCause, Degradation, EmotionAssessment,
    FrameAnalysisResult, GazeDirection, Severity, SpeakingPace, Stage, Violation, ViolationKind,
    VoiceAnalysisResult,
};
pub use audio::{AudioClip, Waveform};
pub use error::{AnalysisError, ModelError};
pub use frame::Frame;
