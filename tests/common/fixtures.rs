use std::io::Cursor;
use std::sync::Arc;

use hound::{SampleFormat, WavSpec, WavWriter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use proctoring_core::analysis::config::AnalysisConfig;
use proctoring_core::geometry::Point2;
use proctoring_core::models::emotion::EmotionClassifier;
use proctoring_core::models::face::{EyeLandmarks, FaceAnalyzer, LandmarkSet};
use proctoring_core::models::object::ObjectDetector;
use proctoring_core::{Frame, ProctorEngine};

use super::models::{ScriptedEmotion, ScriptedFaces, ScriptedObjects};

/// Flat gray RGB frame of the given dimensions.
pub fn rgb_frame(width: u32, height: u32) -> Frame {
    Frame::new(vec![127u8; (width * height * 3) as usize], width, height).expect("build frame")
}

/// Horizontal eye with the iris at `ratio` between the corners.
pub fn eye_with_ratio(ratio: f64) -> EyeLandmarks {
    let inner = Point2::new(0.3, 0.5);
    let outer = Point2::new(0.7, 0.5);
    let iris_x = inner.x + ratio * (outer.x - inner.x);
    EyeLandmarks {
        inner_corner: inner,
        outer_corner: outer,
        iris: [Point2::new(iris_x, 0.5); 4],
    }
}

pub fn landmarks_with_ratio(ratio: f64) -> LandmarkSet {
    LandmarkSet {
        left_eye: eye_with_ratio(ratio),
        right_eye: eye_with_ratio(ratio),
    }
}

pub fn build_engine(
    face: Arc<dyn FaceAnalyzer>,
    object: Option<Arc<dyn ObjectDetector>>,
    emotion: Arc<dyn EmotionClassifier>,
) -> ProctorEngine {
    build_engine_with(AnalysisConfig::default(), face, object, emotion)
}

pub fn build_engine_with(
    config: AnalysisConfig,
    face: Arc<dyn FaceAnalyzer>,
    object: Option<Arc<dyn ObjectDetector>>,
    emotion: Arc<dyn EmotionClassifier>,
) -> ProctorEngine {
    ProctorEngine::new(config, face, object, emotion).expect("engine config")
}

/// Engine over happy-path stubs: one centered face, nothing restricted
/// in view, a mostly-neutral emotion read.
pub fn calm_engine() -> ProctorEngine {
    build_engine(
        Arc::new(ScriptedFaces::with_gaze(1, 0.5)),
        Some(Arc::new(ScriptedObjects::empty())),
        Arc::new(ScriptedEmotion::of(&[("neutral", 90.0), ("happy", 10.0)])),
    )
}

fn pcm16_spec(channels: u16, sample_rate: u32) -> WavSpec {
    WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

fn write_wav(spec: WavSpec, samples: impl Iterator<Item = i16>) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec).expect("wav writer");
        for sample in samples {
            writer.write_sample(sample).expect("write sample");
        }
        writer.finalize().expect("finalize wav");
    }
    cursor.into_inner()
}

/// Mono 16-bit PCM sine tone.
pub fn wav_sine(freq_hz: f32, secs: f32, sample_rate: u32) -> Vec<u8> {
    let count = (secs * sample_rate as f32) as usize;
    let samples = (0..count).map(move |i| {
        let t = i as f32 / sample_rate as f32;
        let value = (2.0 * std::f32::consts::PI * freq_hz * t).sin();
        (value * 0.6 * i16::MAX as f32) as i16
    });
    write_wav(pcm16_spec(1, sample_rate), samples)
}

/// Stereo sine, identical in both channels.
pub fn wav_stereo_sine(freq_hz: f32, secs: f32, sample_rate: u32) -> Vec<u8> {
    let count = (secs * sample_rate as f32) as usize;
    let samples = (0..count).flat_map(move |i| {
        let t = i as f32 / sample_rate as f32;
        let value = (2.0 * std::f32::consts::PI * freq_hz * t).sin();
        let sample = (value * 0.6 * i16::MAX as f32) as i16;
        [sample, sample]
    });
    write_wav(pcm16_spec(2, sample_rate), samples)
}

/// Tone with a slow amplitude envelope, a crude stand-in for speech
/// cadence.
pub fn wav_modulated(secs: f32, sample_rate: u32) -> Vec<u8> {
    let count = (secs * sample_rate as f32) as usize;
    let samples = (0..count).map(move |i| {
        let t = i as f32 / sample_rate as f32;
        let envelope = 0.25 + 0.2 * (2.0 * std::f32::consts::PI * 3.0 * t).sin();
        let carrier = (2.0 * std::f32::consts::PI * 240.0 * t).sin();
        (envelope * carrier * i16::MAX as f32) as i16
    });
    write_wav(pcm16_spec(1, sample_rate), samples)
}

/// Seeded uniform white noise, mono 16-bit PCM.
pub fn wav_noise(secs: f32, sample_rate: u32) -> Vec<u8> {
    let count = (secs * sample_rate as f32) as usize;
    let mut rng = StdRng::seed_from_u64(7);
    let samples: Vec<i16> = (0..count)
        .map(|_| (rng.gen_range(-0.5f32..0.5f32) * i16::MAX as f32) as i16)
        .collect();
    write_wav(pcm16_spec(1, sample_rate), samples.into_iter())
}
