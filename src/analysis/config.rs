use serde::{Deserialize, Serialize};

use super::types::Severity;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceModelConfig {
    pub max_faces: usize,
    pub min_detection_confidence: f64,
    pub min_tracking_confidence: f64,
}

impl Default for FaceModelConfig {
    fn default() -> Self {
        Self {
            max_faces: 2,
            min_detection_confidence: 0.6,
            min_tracking_confidence: 0.6,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GazeConfig {
    /// 虹膜偏移比例低于该值视为看向一侧
    pub away_ratio_low: f64,
    /// 虹膜偏移比例高于该值视为看向另一侧
    pub away_ratio_high: f64,
    /// 眼宽为零时的回退比例（落在中心带内）
    #[serde(default = "default_fallback_ratio")]
    pub fallback_ratio: f64,
}

fn default_fallback_ratio() -> f64 {
    0.5
}

impl Default for GazeConfig {
    fn default() -> Self {
        Self {
            away_ratio_low: 0.15,
            away_ratio_high: 0.85,
            fallback_ratio: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectModelConfig {
    pub restricted_label: String,
    pub min_confidence: f64,
}

impl Default for ObjectModelConfig {
    fn default() -> Self {
        Self {
            restricted_label: "cell phone".to_string(),
            min_confidence: 0.4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionConfig {
    pub stress_labels: Vec<String>,
    pub neutral_label: String,
    pub neutral_stress_level: f64,
    pub neutral_confidence_index: f64,
}

impl Default for EmotionConfig {
    fn default() -> Self {
        Self {
            stress_labels: vec!["fear".to_string(), "angry".to_string(), "sad".to_string()],
            neutral_label: "neutral".to_string(),
            neutral_stress_level: 30.0,
            neutral_confidence_index: 70.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    /// pitch_std 达到该值时 stress_level 拉满
    pub pitch_std_stress_scale: f64,
    /// energy_std 对 tone_stability 的放大系数
    pub energy_std_stability_scale: f64,
    pub tempo_confidence_divisor: f64,
    /// 超过该 BPM 的节奏估计视为不可靠
    pub max_reliable_tempo: f64,
    pub unreliable_tempo_confidence: f64,
    pub pace_normal_min_bpm: f64,
    pub pace_fast_min_bpm: f64,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            pitch_std_stress_scale: 50.0,
            energy_std_stability_scale: 1000.0,
            tempo_confidence_divisor: 2.0,
            max_reliable_tempo: 200.0,
            unreliable_tempo_confidence: 50.0,
            pace_normal_min_bpm: 100.0,
            pace_fast_min_bpm: 180.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoiseConfig {
    /// noise_level 超过该值判定为嘈杂环境
    pub noisy_threshold: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            noisy_threshold: 30.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectralConfig {
    pub frame_len: usize,
    pub hop_len: usize,
    pub pitch_fmin_hz: f32,
    pub pitch_fmax_hz: f32,
    pub tempo_min_bpm: f64,
    pub tempo_max_bpm: f64,
    /// 对数正态节奏先验的中心 BPM
    pub tempo_prior_bpm: f64,
}

impl Default for SpectralConfig {
    fn default() -> Self {
        Self {
            frame_len: 2048,
            hop_len: 512,
            pitch_fmin_hz: 150.0,
            pitch_fmax_hz: 4000.0,
            tempo_min_bpm: 30.0,
            tempo_max_bpm: 300.0,
            tempo_prior_bpm: 120.0,
        }
    }
}

/// Weight tables for the two integrity formulas. Frame and session weights
/// are distinct scales and never unified.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    pub frame_weight_low: f64,
    pub frame_weight_medium: f64,
    pub frame_weight_high: f64,
    pub session_weight_low: f64,
    pub session_weight_medium: f64,
    pub session_weight_high: f64,
    pub session_weight_multiplier: f64,
    /// 每次 face_not_visible 扣除的可见度百分比
    pub face_visible_penalty: f64,
    /// 每次 looking_away 扣除的专注度分数
    pub attention_penalty: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            frame_weight_low: 5.0,
            frame_weight_medium: 15.0,
            frame_weight_high: 30.0,
            session_weight_low: 1.0,
            session_weight_medium: 3.0,
            session_weight_high: 5.0,
            session_weight_multiplier: 2.0,
            face_visible_penalty: 5.0,
            attention_penalty: 3.0,
        }
    }
}

impl ScoringConfig {
    pub fn frame_weight(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Low => self.frame_weight_low,
            Severity::Medium => self.frame_weight_medium,
            Severity::High => self.frame_weight_high,
        }
    }

    pub fn session_weight(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Low => self.session_weight_low,
            Severity::Medium => self.session_weight_medium,
            Severity::High => self.session_weight_high,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringConfig {
    pub sample_rate: f64,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self { sample_rate: 0.05 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    pub inference_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            inference_timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisConfig {
    pub face_model: FaceModelConfig,
    pub gaze: GazeConfig,
    pub object_model: ObjectModelConfig,
    pub emotion: EmotionConfig,
    pub voice: VoiceConfig,
    pub noise: NoiseConfig,
    #[serde(default)]
    pub spectral: SpectralConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl AnalysisConfig {
    pub fn from_env(env_config: &crate::config::ProctorEnvConfig) -> Self {
        let mut config = Self::default();
        config.engine.inference_timeout_ms = env_config.inference_timeout_ms;
        config.monitoring.sample_rate = env_config.monitor_sample_rate;
        config.object_model.min_confidence = env_config.phone_confidence;
        config
    }

    pub fn validate(&self) -> Result<(), String> {
        // GazeConfig 比例带检查
        if !(0.0..=1.0).contains(&self.gaze.away_ratio_low) {
            return Err("gaze.away_ratio_low must be in [0,1]".to_string());
        }
        if !(0.0..=1.0).contains(&self.gaze.away_ratio_high) {
            return Err("gaze.away_ratio_high must be in [0,1]".to_string());
        }
        if self.gaze.away_ratio_low >= self.gaze.away_ratio_high {
            return Err("gaze.away_ratio_low must be < gaze.away_ratio_high".to_string());
        }
        if self.gaze.fallback_ratio <= self.gaze.away_ratio_low
            || self.gaze.fallback_ratio >= self.gaze.away_ratio_high
        {
            return Err("gaze.fallback_ratio must fall inside the center band".to_string());
        }

        if self.face_model.max_faces == 0 {
            return Err("face_model.max_faces must be > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.face_model.min_detection_confidence) {
            return Err("face_model.min_detection_confidence must be in [0,1]".to_string());
        }
        if !(0.0..=1.0).contains(&self.face_model.min_tracking_confidence) {
            return Err("face_model.min_tracking_confidence must be in [0,1]".to_string());
        }

        if self.object_model.restricted_label.is_empty() {
            return Err("object_model.restricted_label must not be empty".to_string());
        }
        if !(0.0..=1.0).contains(&self.object_model.min_confidence) {
            return Err("object_model.min_confidence must be in [0,1]".to_string());
        }

        if self.emotion.stress_labels.is_empty() {
            return Err("emotion.stress_labels must not be empty".to_string());
        }
        if !(0.0..=100.0).contains(&self.emotion.neutral_stress_level) {
            return Err("emotion.neutral_stress_level must be in [0,100]".to_string());
        }
        if !(0.0..=100.0).contains(&self.emotion.neutral_confidence_index) {
            return Err("emotion.neutral_confidence_index must be in [0,100]".to_string());
        }

        // VoiceConfig
        if self.voice.pitch_std_stress_scale <= 0.0 {
            return Err("voice.pitch_std_stress_scale must be > 0".to_string());
        }
        if self.voice.energy_std_stability_scale <= 0.0 {
            return Err("voice.energy_std_stability_scale must be > 0".to_string());
        }
        if self.voice.tempo_confidence_divisor <= 0.0 {
            return Err("voice.tempo_confidence_divisor must be > 0".to_string());
        }
        if self.voice.pace_normal_min_bpm >= self.voice.pace_fast_min_bpm {
            return Err("voice.pace_normal_min_bpm must be < pace_fast_min_bpm".to_string());
        }
        if !(0.0..=100.0).contains(&self.voice.unreliable_tempo_confidence) {
            return Err("voice.unreliable_tempo_confidence must be in [0,100]".to_string());
        }

        if self.noise.noisy_threshold < 0.0 {
            return Err("noise.noisy_threshold must be >= 0".to_string());
        }

        // SpectralConfig
        if self.spectral.frame_len == 0 {
            return Err("spectral.frame_len must be > 0".to_string());
        }
        if self.spectral.hop_len == 0 || self.spectral.hop_len > self.spectral.frame_len {
            return Err("spectral.hop_len must be in (0, frame_len]".to_string());
        }
        if self.spectral.pitch_fmin_hz <= 0.0
            || self.spectral.pitch_fmin_hz >= self.spectral.pitch_fmax_hz
        {
            return Err("spectral pitch band must satisfy 0 < fmin < fmax".to_string());
        }
        if self.spectral.tempo_min_bpm <= 0.0
            || self.spectral.tempo_min_bpm >= self.spectral.tempo_max_bpm
        {
            return Err("spectral tempo window must satisfy 0 < min < max".to_string());
        }
        if self.spectral.tempo_prior_bpm < self.spectral.tempo_min_bpm
            || self.spectral.tempo_prior_bpm > self.spectral.tempo_max_bpm
        {
            return Err("spectral.tempo_prior_bpm must fall inside the tempo window".to_string());
        }

        // ScoringConfig
        if self.scoring.frame_weight_low < 0.0
            || self.scoring.frame_weight_medium < 0.0
            || self.scoring.frame_weight_high < 0.0
        {
            return Err("scoring frame weights must be >= 0".to_string());
        }
        if self.scoring.frame_weight_low > self.scoring.frame_weight_medium
            || self.scoring.frame_weight_medium > self.scoring.frame_weight_high
        {
            return Err("scoring frame weights must be non-decreasing by severity".to_string());
        }
        if self.scoring.session_weight_low > self.scoring.session_weight_medium
            || self.scoring.session_weight_medium > self.scoring.session_weight_high
        {
            return Err("scoring session weights must be non-decreasing by severity".to_string());
        }
        if self.scoring.session_weight_multiplier <= 0.0 {
            return Err("scoring.session_weight_multiplier must be > 0".to_string());
        }
        if self.scoring.face_visible_penalty < 0.0 || self.scoring.attention_penalty < 0.0 {
            return Err("scoring penalties must be >= 0".to_string());
        }

        if !(0.0..=1.0).contains(&self.monitoring.sample_rate) {
            return Err("monitoring.sample_rate must be in [0,1]".to_string());
        }

        if self.engine.inference_timeout_ms == 0 {
            return Err("engine.inference_timeout_ms must be > 0".to_string());
        }

        Ok(())
    }
}
