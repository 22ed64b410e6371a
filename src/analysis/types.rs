//! Result and violation types for the analysis pipeline.
//!
//! Every result type is fully populated on every path: internal failures
//! substitute neutral defaults and record a [`Degradation`] instead of
//! leaving fields blank. All wire shapes are camelCase JSON.

use serde::{Deserialize, Serialize};

use crate::models::emotion::EmotionScores;

/// Violation severity, ordered from least to most serious.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// The categories of proctoring violations this pipeline emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    FaceNotVisible,
    MultiplePersons,
    LookingAway,
    PhoneDetected,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FaceNotVisible => "face_not_visible",
            Self::MultiplePersons => "multiple_persons",
            Self::LookingAway => "looking_away",
            Self::PhoneDetected => "phone_detected",
        }
    }
}

/// One violation observed in a frame. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    #[serde(rename = "type")]
    pub kind: ViolationKind,
    pub severity: Severity,
    pub details: String,
}

impl Violation {
    pub fn face_not_visible() -> Self {
        Self {
            kind: ViolationKind::FaceNotVisible,
            severity: Severity::High,
            details: "No face detected in frame".to_string(),
        }
    }

    pub fn multiple_persons(count: usize) -> Self {
        Self {
            kind: ViolationKind::MultiplePersons,
            severity: Severity::High,
            details: format!("Detected {count} persons"),
        }
    }

    pub fn looking_away() -> Self {
        Self {
            kind: ViolationKind::LookingAway,
            severity: Severity::Low,
            details: "User may not be looking at the camera".to_string(),
        }
    }

    pub fn phone_detected() -> Self {
        Self {
            kind: ViolationKind::PhoneDetected,
            severity: Severity::High,
            details: "Mobile phone detected in frame".to_string(),
        }
    }
}

/// Gaze classification for one landmark set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GazeDirection {
    Center,
    Away,
}

/// Pipeline stages, used as metric and degradation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    FaceDetection,
    Gaze,
    ObjectDetection,
    Emotion,
    Voice,
    Noise,
    Frame,
}

impl Stage {
    pub const ALL: [Stage; 7] = [
        Stage::FaceDetection,
        Stage::Gaze,
        Stage::ObjectDetection,
        Stage::Emotion,
        Stage::Voice,
        Stage::Noise,
        Stage::Frame,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FaceDetection => "face_detection",
            Self::Gaze => "gaze",
            Self::ObjectDetection => "object_detection",
            Self::Emotion => "emotion",
            Self::Voice => "voice",
            Self::Noise => "noise",
            Self::Frame => "frame",
        }
    }
}

/// Why a stage fell back to its neutral default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradeCause {
    ModelUnavailable,
    InferenceFailed,
    DecodeFailed,
    Timeout,
}

/// A recorded fallback: which stage degraded and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Degradation {
    pub stage: Stage,
    pub cause: DegradeCause,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub detail: Option<String>,
}

impl Degradation {
    pub fn new(stage: Stage, cause: DegradeCause) -> Self {
        Self {
            stage,
            cause,
            detail: None,
        }
    }

    pub fn with_detail(stage: Stage, cause: DegradeCause, detail: impl Into<String>) -> Self {
        Self {
            stage,
            cause,
            detail: Some(detail.into()),
        }
    }
}

/// An analysis outcome that distinguishes a clean run from one that
/// substituted a neutral default. Both variants carry a usable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "camelCase")]
pub enum Analysis<T> {
    Complete(T),
    Degraded { value: T, degradation: Degradation },
}

impl<T> Analysis<T> {
    pub fn value(&self) -> &T {
        match self {
            Self::Complete(value) => value,
            Self::Degraded { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Complete(value) => value,
            Self::Degraded { value, .. } => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    pub fn degradation(&self) -> Option<&Degradation> {
        match self {
            Self::Complete(_) => None,
            Self::Degraded { degradation, .. } => Some(degradation),
        }
    }
}

/// Per-frame analysis result. Always fully populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameAnalysisResult {
    pub face_detected: bool,
    pub face_count: usize,
    pub looking_at_camera: bool,
    pub phone_detected: bool,
    pub emotion: String,
    pub confidence_level: f64,
    pub violations: Vec<Violation>,
    pub integrity_score: f64,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub degradations: Vec<Degradation>,
}

impl Default for FrameAnalysisResult {
    fn default() -> Self {
        Self {
            face_detected: false,
            face_count: 0,
            looking_at_camera: true,
            phone_detected: false,
            emotion: "neutral".to_string(),
            confidence_level: 70.0,
            violations: Vec::new(),
            integrity_score: 100.0,
            degradations: Vec::new(),
        }
    }
}

/// Stress, confidence and dominant label derived from one emotion
/// distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionAssessment {
    pub emotions: EmotionScores,
    pub dominant_emotion: String,
    pub stress_level: f64,
    pub confidence_index: f64,
}

impl Default for EmotionAssessment {
    fn default() -> Self {
        Self {
            emotions: EmotionScores::default(),
            dominant_emotion: "neutral".to_string(),
            stress_level: 30.0,
            confidence_index: 70.0,
        }
    }
}

/// Speaking pace classes derived from estimated tempo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakingPace {
    Slow,
    Normal,
    Fast,
}

/// Voice feature scores for one audio clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceAnalysisResult {
    pub stress_level: f64,
    pub confidence_index: f64,
    pub tone_stability: f64,
    pub speaking_pace: SpeakingPace,
}

impl Default for VoiceAnalysisResult {
    fn default() -> Self {
        Self {
            stress_level: 30.0,
            confidence_index: 70.0,
            tone_stability: 80.0,
            speaking_pace: SpeakingPace::Normal,
        }
    }
}

/// Ambient noise quality classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioQuality {
    Good,
    Poor,
    Unknown,
}

/// Ambient noise estimate for one audio clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioQualityResult {
    pub noise_level: f64,
    pub is_noisy: bool,
    pub audio_quality: AudioQuality,
}

impl Default for AudioQualityResult {
    fn default() -> Self {
        Self {
            noise_level: 0.0,
            is_noisy: false,
            audio_quality: AudioQuality::Unknown,
        }
    }
}
