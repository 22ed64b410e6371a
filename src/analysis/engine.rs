use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::audio::{self, noise as noise_analysis, voice as voice_analysis, AudioClip};
use crate::error::{AnalysisError, ModelError};
use crate::frame::Frame;
use crate::models::emotion::EmotionClassifier;
use crate::models::face::{FaceAnalyzer, FaceObservations};
use crate::models::object::{contains_restricted, ObjectDetector};

use super::config::{AnalysisConfig, ScoringConfig};
use super::emotion as emotion_assessment;
use super::gaze;
use super::metrics::MetricsRegistry;
use super::monitoring;
use super::types::*;

/// Per-frame integrity sub-score: 100 minus the frame weight of every
/// violation, floored at zero. Distinct from the session score.
pub fn frame_integrity(violations: &[Violation], scoring: &ScoringConfig) -> f64 {
    let total: f64 = violations
        .iter()
        .map(|v| scoring.frame_weight(v.severity))
        .sum();
    (100.0 - total).max(0.0)
}

fn degrade_cause(err: &ModelError) -> DegradeCause {
    match err {
        ModelError::Unavailable => DegradeCause::ModelUnavailable,
        ModelError::Inference(_) => DegradeCause::InferenceFailed,
    }
}

/// The frame/audio analysis pipeline.
///
/// Model backends are constructed once and shared; the engine itself is
/// stateless per call and cheap to clone, so it can be held behind an
/// `Arc` or cloned into tasks freely. All entry points return fully
/// populated results; model failures surface as degradations, never as
/// errors.
#[derive(Clone)]
pub struct ProctorEngine {
    config: AnalysisConfig,
    face: Arc<dyn FaceAnalyzer>,
    object: Option<Arc<dyn ObjectDetector>>,
    emotion: Arc<dyn EmotionClassifier>,
    metrics_registry: Arc<MetricsRegistry>,
}

impl ProctorEngine {
    /// Build an engine over the given model backends. A missing object
    /// detector is allowed; phone checks then degrade permanently.
    pub fn new(
        config: AnalysisConfig,
        face: Arc<dyn FaceAnalyzer>,
        object: Option<Arc<dyn ObjectDetector>>,
        emotion: Arc<dyn EmotionClassifier>,
    ) -> Result<Self, String> {
        config.validate()?;
        if object.is_none() {
            tracing::warn!("object detector unavailable, phone checks disabled");
        }
        Ok(Self {
            config,
            face,
            object,
            emotion,
            metrics_registry: Arc::new(MetricsRegistry::new()),
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn metrics_registry(&self) -> &Arc<MetricsRegistry> {
        &self.metrics_registry
    }

    /// Analyze one video frame. `Err` only for malformed input; model
    /// failures degrade to neutral defaults inside the result.
    pub fn analyze_frame(&self, frame: &Frame) -> Result<FrameAnalysisResult, AnalysisError> {
        let start = Instant::now();
        frame.validate()?;

        let mut result = FrameAnalysisResult {
            emotion: self.config.emotion.neutral_label.clone(),
            confidence_level: self.config.emotion.neutral_confidence_index,
            ..Default::default()
        };

        let observations = self.detect_faces(frame, &mut result);
        self.classify_gaze(frame, &observations, &mut result);
        self.detect_phone(frame, &mut result);

        result.integrity_score = frame_integrity(&result.violations, &self.config.scoring);

        if result.face_detected {
            self.classify_emotion(frame, &mut result);
        }

        let latency_ms = start.elapsed().as_millis() as i64;
        self.metrics_registry.record_call(
            Stage::Frame,
            start.elapsed().as_micros() as u64,
            !result.degradations.is_empty(),
        );
        monitoring::record_frame(&result, latency_ms, &self.config);

        Ok(result)
    }

    /// Voice features for one audio clip. Decode failure yields neutral
    /// scores inside `Analysis::Degraded`.
    pub fn analyze_voice(
        &self,
        clip: &AudioClip,
    ) -> Result<Analysis<VoiceAnalysisResult>, AnalysisError> {
        let start = Instant::now();
        clip.validate()?;

        let outcome = match audio::decode_wav(&clip.bytes) {
            Ok(wave) => Analysis::Complete(voice_analysis::analyze(
                &wave,
                &self.config.voice,
                &self.config.spectral,
            )),
            Err(err) => {
                tracing::warn!(stage = Stage::Voice.as_str(), error = %err, "audio decode failed, using neutral voice scores");
                Analysis::Degraded {
                    value: VoiceAnalysisResult::default(),
                    degradation: Degradation::with_detail(
                        Stage::Voice,
                        DegradeCause::DecodeFailed,
                        err.to_string(),
                    ),
                }
            }
        };

        self.metrics_registry.record_call(
            Stage::Voice,
            start.elapsed().as_micros() as u64,
            outcome.is_degraded(),
        );
        Ok(outcome)
    }

    /// Ambient noise estimate for one audio clip.
    pub fn analyze_audio_quality(
        &self,
        clip: &AudioClip,
    ) -> Result<Analysis<AudioQualityResult>, AnalysisError> {
        let start = Instant::now();
        clip.validate()?;

        let outcome = match audio::decode_wav(&clip.bytes) {
            Ok(wave) => Analysis::Complete(noise_analysis::analyze(
                &wave,
                &self.config.noise,
                &self.config.spectral,
            )),
            Err(err) => {
                tracing::warn!(stage = Stage::Noise.as_str(), error = %err, "audio decode failed, noise level unknown");
                Analysis::Degraded {
                    value: AudioQualityResult::default(),
                    degradation: Degradation::with_detail(
                        Stage::Noise,
                        DegradeCause::DecodeFailed,
                        err.to_string(),
                    ),
                }
            }
        };

        self.metrics_registry.record_call(
            Stage::Noise,
            start.elapsed().as_micros() as u64,
            outcome.is_degraded(),
        );
        Ok(outcome)
    }

    /// `analyze_frame` on the blocking pool under the configured timeout.
    /// A timeout or panicked task yields a neutral result, not an error.
    pub async fn analyze_frame_bounded(
        &self,
        frame: Frame,
    ) -> Result<FrameAnalysisResult, AnalysisError> {
        frame.validate()?;
        let engine = self.clone();
        let task = tokio::task::spawn_blocking(move || engine.analyze_frame(&frame));

        match tokio::time::timeout(self.inference_timeout(), task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => {
                tracing::error!(error = %join_err, "frame analysis task failed");
                Ok(self.neutral_frame_result(Degradation::with_detail(
                    Stage::Frame,
                    DegradeCause::InferenceFailed,
                    join_err.to_string(),
                )))
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.config.engine.inference_timeout_ms,
                    "frame analysis timed out"
                );
                self.metrics_registry.record_call(
                    Stage::Frame,
                    self.config.engine.inference_timeout_ms * 1_000,
                    true,
                );
                Ok(self.neutral_frame_result(Degradation::new(Stage::Frame, DegradeCause::Timeout)))
            }
        }
    }

    /// `analyze_voice` on the blocking pool under the configured timeout.
    pub async fn analyze_voice_bounded(
        &self,
        clip: AudioClip,
    ) -> Result<Analysis<VoiceAnalysisResult>, AnalysisError> {
        clip.validate()?;
        let engine = self.clone();
        let task = tokio::task::spawn_blocking(move || engine.analyze_voice(&clip));

        match tokio::time::timeout(self.inference_timeout(), task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => {
                tracing::error!(error = %join_err, "voice analysis task failed");
                Ok(Analysis::Degraded {
                    value: VoiceAnalysisResult::default(),
                    degradation: Degradation::with_detail(
                        Stage::Voice,
                        DegradeCause::InferenceFailed,
                        join_err.to_string(),
                    ),
                })
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.config.engine.inference_timeout_ms,
                    "voice analysis timed out"
                );
                Ok(Analysis::Degraded {
                    value: VoiceAnalysisResult::default(),
                    degradation: Degradation::new(Stage::Voice, DegradeCause::Timeout),
                })
            }
        }
    }

    /// `analyze_audio_quality` on the blocking pool under the configured
    /// timeout.
    pub async fn analyze_audio_quality_bounded(
        &self,
        clip: AudioClip,
    ) -> Result<Analysis<AudioQualityResult>, AnalysisError> {
        clip.validate()?;
        let engine = self.clone();
        let task = tokio::task::spawn_blocking(move || engine.analyze_audio_quality(&clip));

        match tokio::time::timeout(self.inference_timeout(), task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => {
                tracing::error!(error = %join_err, "noise analysis task failed");
                Ok(Analysis::Degraded {
                    value: AudioQualityResult::default(),
                    degradation: Degradation::with_detail(
                        Stage::Noise,
                        DegradeCause::InferenceFailed,
                        join_err.to_string(),
                    ),
                })
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.config.engine.inference_timeout_ms,
                    "noise analysis timed out"
                );
                Ok(Analysis::Degraded {
                    value: AudioQualityResult::default(),
                    degradation: Degradation::new(Stage::Noise, DegradeCause::Timeout),
                })
            }
        }
    }

    fn inference_timeout(&self) -> Duration {
        Duration::from_millis(self.config.engine.inference_timeout_ms)
    }

    fn neutral_frame_result(&self, degradation: Degradation) -> FrameAnalysisResult {
        let mut result = FrameAnalysisResult {
            emotion: self.config.emotion.neutral_label.clone(),
            confidence_level: self.config.emotion.neutral_confidence_index,
            ..Default::default()
        };
        result.degradations.push(degradation);
        result
    }

    fn detect_faces(&self, frame: &Frame, result: &mut FrameAnalysisResult) -> FaceObservations {
        let start = Instant::now();
        let detection = self.face.detect(frame);
        self.metrics_registry.record_call(
            Stage::FaceDetection,
            start.elapsed().as_micros() as u64,
            detection.is_err(),
        );

        match detection {
            Ok(observations) => {
                result.face_count = observations.face_count();
                result.face_detected = observations.detected();

                if observations.face_count() == 0 {
                    result.looking_at_camera = false;
                    result.violations.push(Violation::face_not_visible());
                } else if observations.face_count() > 1 {
                    result
                        .violations
                        .push(Violation::multiple_persons(observations.face_count()));
                }
                observations
            }
            Err(err) => {
                // A model failure is not evidence of an empty frame, so no
                // violation is raised and the gaze assumption stands.
                tracing::warn!(stage = Stage::FaceDetection.as_str(), error = %err, "face detection failed, frame inconclusive");
                result.degradations.push(Degradation::with_detail(
                    Stage::FaceDetection,
                    degrade_cause(&err),
                    err.to_string(),
                ));
                FaceObservations::default()
            }
        }
    }

    fn classify_gaze(
        &self,
        frame: &Frame,
        observations: &FaceObservations,
        result: &mut FrameAnalysisResult,
    ) {
        let start = Instant::now();
        for set in &observations.landmark_sets {
            if gaze::classify(set, frame.width, frame.height, &self.config.gaze)
                == GazeDirection::Away
            {
                result.looking_at_camera = false;
                result.violations.push(Violation::looking_away());
            }
        }
        self.metrics_registry.record_call(
            Stage::Gaze,
            start.elapsed().as_micros() as u64,
            false,
        );
    }

    fn detect_phone(&self, frame: &Frame, result: &mut FrameAnalysisResult) {
        let start = Instant::now();
        let detector = match &self.object {
            Some(detector) => detector,
            None => {
                self.metrics_registry.record_call(
                    Stage::ObjectDetection,
                    start.elapsed().as_micros() as u64,
                    true,
                );
                result.degradations.push(Degradation::new(
                    Stage::ObjectDetection,
                    DegradeCause::ModelUnavailable,
                ));
                return;
            }
        };

        let detection = detector.detect(frame);
        self.metrics_registry.record_call(
            Stage::ObjectDetection,
            start.elapsed().as_micros() as u64,
            detection.is_err(),
        );

        match detection {
            Ok(detections) => {
                if contains_restricted(
                    &detections,
                    &self.config.object_model.restricted_label,
                    self.config.object_model.min_confidence,
                ) {
                    result.phone_detected = true;
                    result.violations.push(Violation::phone_detected());
                }
            }
            Err(err) => {
                tracing::warn!(stage = Stage::ObjectDetection.as_str(), error = %err, "object detection failed, phone check skipped");
                result.degradations.push(Degradation::with_detail(
                    Stage::ObjectDetection,
                    degrade_cause(&err),
                    err.to_string(),
                ));
            }
        }
    }

    fn classify_emotion(&self, frame: &Frame, result: &mut FrameAnalysisResult) {
        let start = Instant::now();
        let classification = self.emotion.classify(frame);
        self.metrics_registry.record_call(
            Stage::Emotion,
            start.elapsed().as_micros() as u64,
            classification.is_err(),
        );

        match classification {
            Ok(scores) => {
                let assessment = emotion_assessment::assess(scores, &self.config.emotion);
                result.emotion = assessment.dominant_emotion;
                result.confidence_level = assessment.confidence_index;
            }
            Err(err) => {
                tracing::warn!(stage = Stage::Emotion.as_str(), error = %err, "emotion classification failed, using neutral");
                result.degradations.push(Degradation::with_detail(
                    Stage::Emotion,
                    degrade_cause(&err),
                    err.to_string(),
                ));
                let fallback = emotion_assessment::fallback(&self.config.emotion);
                result.emotion = fallback.dominant_emotion;
                result.confidence_level = fallback.confidence_index;
            }
        }
    }
}
