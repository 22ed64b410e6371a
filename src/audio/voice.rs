//! Voice feature extraction: pitch spread, tempo, and energy stability
//! mapped onto stress, confidence, and pace scores.

use super::dsp;
use super::Waveform;
use crate::analysis::config::{SpectralConfig, VoiceConfig};
use crate::analysis::types::{SpeakingPace, VoiceAnalysisResult};

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Extract voice features from a decoded waveform.
pub fn analyze(
    waveform: &Waveform,
    voice_cfg: &VoiceConfig,
    spectral_cfg: &SpectralConfig,
) -> VoiceAnalysisResult {
    let spec = dsp::magnitude_frames(
        &waveform.samples,
        waveform.sample_rate,
        spectral_cfg.frame_len,
        spectral_cfg.hop_len,
    );

    let pitches = dsp::pitch_track(&spec, spectral_cfg.pitch_fmin_hz, spectral_cfg.pitch_fmax_hz);
    let pitch_std = dsp::std_dev(&pitches);

    let tempo = dsp::estimate_tempo(
        &spec,
        waveform.sample_rate,
        spectral_cfg.hop_len,
        spectral_cfg.tempo_min_bpm,
        spectral_cfg.tempo_max_bpm,
        spectral_cfg.tempo_prior_bpm,
    );

    let energy = dsp::rms_frames(&waveform.samples, spectral_cfg.frame_len, spectral_cfg.hop_len);
    let energy_std = dsp::std_dev(&energy);

    tracing::debug!(
        duration_secs = waveform.duration_secs(),
        pitch_std,
        tempo,
        energy_std,
        "voice features"
    );
    scores(pitch_std, tempo, energy_std, voice_cfg)
}

/// Map raw voice features onto the reported scores.
pub fn scores(
    pitch_std: f64,
    tempo: f64,
    energy_std: f64,
    cfg: &VoiceConfig,
) -> VoiceAnalysisResult {
    let stress_level = (pitch_std / cfg.pitch_std_stress_scale * 100.0).min(100.0);
    let tone_stability = (100.0 - energy_std * cfg.energy_std_stability_scale).max(0.0);
    let confidence_index = if tempo < cfg.max_reliable_tempo {
        (tempo / cfg.tempo_confidence_divisor).min(100.0)
    } else {
        cfg.unreliable_tempo_confidence
    };

    VoiceAnalysisResult {
        stress_level: round2(stress_level),
        confidence_index: round2(confidence_index),
        tone_stability: round2(tone_stability),
        speaking_pace: classify_pace(tempo, cfg),
    }
}

/// Pace class from tempo. Lower bounds inclusive, so exactly 100 BPM is
/// normal and exactly 180 BPM is fast.
pub fn classify_pace(tempo: f64, cfg: &VoiceConfig) -> SpeakingPace {
    if tempo >= cfg.pace_fast_min_bpm {
        SpeakingPace::Fast
    } else if tempo >= cfg.pace_normal_min_bpm {
        SpeakingPace::Normal
    } else {
        SpeakingPace::Slow
    }
}
