//! Ambient noise estimation from spectral flatness.

use super::dsp;
use super::Waveform;
use crate::analysis::config::{NoiseConfig, SpectralConfig};
use crate::analysis::types::{AudioQuality, AudioQualityResult};

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Estimate ambient noise for a decoded waveform. Broadband content reads
/// as noise; tonal content (speech, hum) does not.
pub fn analyze(
    waveform: &Waveform,
    noise_cfg: &NoiseConfig,
    spectral_cfg: &SpectralConfig,
) -> AudioQualityResult {
    let energy = dsp::rms_frames(&waveform.samples, spectral_cfg.frame_len, spectral_cfg.hop_len);
    let mean_rms = dsp::mean(&energy);

    let spec = dsp::magnitude_frames(
        &waveform.samples,
        waveform.sample_rate,
        spectral_cfg.frame_len,
        spectral_cfg.hop_len,
    );
    let flatness = dsp::mean_spectral_flatness(&spec);

    let noise_level = round2(flatness * 100.0);
    let is_noisy = noise_level > noise_cfg.noisy_threshold;

    tracing::debug!(mean_rms, noise_level, is_noisy, "ambient noise estimate");

    AudioQualityResult {
        noise_level,
        is_noisy,
        audio_quality: if is_noisy {
            AudioQuality::Poor
        } else {
            AudioQuality::Good
        },
    }
}
