//! Frame analysis pipeline: gaze and emotion derivation, orchestration,
//! session aggregation, and telemetry.

pub mod config;
pub mod emotion;
pub mod engine;
pub mod gaze;
pub mod metrics;
pub mod monitoring;
pub mod session;
pub mod types;
