//! Short-time spectral analysis primitives.
//!
//! Everything here operates on mono `Array1<f32>` waveforms. Frames are
//! Hamming-windowed, FFT'd with a forward planner, and reduced to one-sided
//! magnitude spectra. The pitch and tempo estimators consume those frames;
//! neither allocates a planner beyond the call.

use std::f32::consts::PI;

use ndarray::Array1;
use num_complex::Complex32;
use rustfft::FftPlanner;

const MAG_FLOOR: f64 = 1e-10;

/// Hamming window of length `n`.
pub fn hamming(n: usize) -> Vec<f32> {
    if n == 1 {
        return vec![1.0];
    }
    (0..n)
        .map(|i| 0.54 - 0.46 * (2.0 * PI * i as f32 / (n - 1) as f32).cos())
        .collect()
}

/// One-sided magnitude spectrogram: `frames[t][k]` is the magnitude of bin
/// `k` in frame `t`, with bins spaced `bin_hz` apart.
#[derive(Debug, Clone)]
pub struct Spectrogram {
    pub frames: Vec<Vec<f32>>,
    pub bin_hz: f32,
}

/// Windowed magnitude frames over the whole clip. A clip shorter than one
/// frame yields a single zero-padded frame.
pub fn magnitude_frames(
    samples: &Array1<f32>,
    sample_rate: u32,
    frame_len: usize,
    hop_len: usize,
) -> Spectrogram {
    let window = hamming(frame_len);
    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(frame_len);

    let n = samples.len();
    let mut frames = Vec::new();
    let mut start = 0usize;
    loop {
        let mut buf: Vec<Complex32> = (0..frame_len)
            .map(|i| {
                let idx = start + i;
                let s = if idx < n { samples[idx] } else { 0.0 };
                Complex32::new(s * window[i], 0.0)
            })
            .collect();
        fft.process(&mut buf);
        frames.push(buf[..=frame_len / 2].iter().map(|c| c.norm()).collect());

        if start + frame_len >= n {
            break;
        }
        start += hop_len;
    }

    Spectrogram {
        frames,
        bin_hz: sample_rate as f32 / frame_len as f32,
    }
}

fn rms_of(samples: &Array1<f32>, start: usize, len: usize) -> f64 {
    let mut sum = 0.0f64;
    for i in start..start + len {
        let s = samples[i] as f64;
        sum += s * s;
    }
    (sum / len as f64).sqrt()
}

/// Per-frame RMS energy. A clip shorter than one frame yields a single
/// whole-clip value.
pub fn rms_frames(samples: &Array1<f32>, frame_len: usize, hop_len: usize) -> Vec<f64> {
    let n = samples.len();
    if n == 0 {
        return Vec::new();
    }
    if n < frame_len {
        return vec![rms_of(samples, 0, n)];
    }
    let mut out = Vec::new();
    let mut start = 0usize;
    while start + frame_len <= n {
        out.push(rms_of(samples, start, frame_len));
        start += hop_len;
    }
    out
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation. Empty input reads as zero spread.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Mean spectral flatness over all frames: geometric over arithmetic mean
/// of each magnitude spectrum, floored at 1e-10 before the log. Near 1 for
/// broadband noise, near 0 for tonal content.
pub fn mean_spectral_flatness(spec: &Spectrogram) -> f64 {
    if spec.frames.is_empty() {
        return 0.0;
    }
    let mut total = 0.0f64;
    for frame in &spec.frames {
        let len = frame.len() as f64;
        let mut log_sum = 0.0f64;
        let mut lin_sum = 0.0f64;
        for &m in frame {
            let floored = (m as f64).max(MAG_FLOOR);
            log_sum += floored.ln();
            lin_sum += floored;
        }
        let gmean = (log_sum / len).exp();
        let amean = lin_sum / len;
        total += gmean / amean;
    }
    total / spec.frames.len() as f64
}

/// Dominant frequency per frame within `[fmin_hz, fmax_hz]`, refined by
/// parabolic interpolation around the peak bin. Silent frames contribute
/// nothing.
pub fn pitch_track(spec: &Spectrogram, fmin_hz: f32, fmax_hz: f32) -> Vec<f64> {
    let mut pitches = Vec::new();
    if spec.bin_hz <= 0.0 {
        return pitches;
    }
    for frame in &spec.frames {
        if frame.is_empty() {
            continue;
        }
        let lo = (fmin_hz / spec.bin_hz).ceil() as usize;
        let hi = ((fmax_hz / spec.bin_hz).floor() as usize).min(frame.len() - 1);
        if lo > hi {
            continue;
        }

        let mut best = lo;
        for k in lo..=hi {
            if frame[k] > frame[best] {
                best = k;
            }
        }
        if (frame[best] as f64) <= MAG_FLOOR {
            continue;
        }

        let mut delta = 0.0f64;
        if best > 0 && best + 1 < frame.len() {
            let alpha = frame[best - 1] as f64;
            let beta = frame[best] as f64;
            let gamma = frame[best + 1] as f64;
            let denom = alpha - 2.0 * beta + gamma;
            if denom.abs() > 1e-12 {
                delta = (0.5 * (alpha - gamma) / denom).clamp(-0.5, 0.5);
            }
        }

        let freq = (best as f64 + delta) * spec.bin_hz as f64;
        if freq > 0.0 {
            pitches.push(freq);
        }
    }
    pitches
}

/// Tempo estimate in BPM from the onset-strength envelope.
///
/// The envelope is half-wave-rectified spectral flux; its autocorrelation
/// is scored against a log-normal prior (sigma of one octave) centered on
/// `prior_bpm`, and the best lag inside the BPM window wins. Returns 0 when
/// the clip is too short or shows no positive periodicity.
pub fn estimate_tempo(
    spec: &Spectrogram,
    sample_rate: u32,
    hop_len: usize,
    min_bpm: f64,
    max_bpm: f64,
    prior_bpm: f64,
) -> f64 {
    let mut envelope = Vec::new();
    for pair in spec.frames.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        let mut flux = 0.0f64;
        for (p, c) in prev.iter().zip(cur.iter()) {
            let d = (*c - *p) as f64;
            if d > 0.0 {
                flux += d;
            }
        }
        envelope.push(flux / cur.len().max(1) as f64);
    }
    if envelope.len() < 4 {
        return 0.0;
    }

    let m = mean(&envelope);
    let centered: Vec<f64> = envelope.iter().map(|v| v - m).collect();

    let frames_per_sec = sample_rate as f64 / hop_len as f64;
    let lag_for = |bpm: f64| frames_per_sec * 60.0 / bpm;
    let min_lag = lag_for(max_bpm).floor().max(1.0) as usize;
    let max_lag = (lag_for(min_bpm).ceil() as usize).min(centered.len() - 1);
    if min_lag > max_lag {
        return 0.0;
    }

    let mut best_bpm = 0.0;
    let mut best_score = 0.0f64;
    for lag in min_lag..=max_lag {
        let mut acf = 0.0f64;
        for i in lag..centered.len() {
            acf += centered[i] * centered[i - lag];
        }
        let bpm = frames_per_sec * 60.0 / lag as f64;
        let octaves = (bpm / prior_bpm).log2();
        let score = acf * (-0.5 * octaves * octaves).exp();
        if score > best_score {
            best_score = score;
            best_bpm = bpm;
        }
    }
    best_bpm
}
