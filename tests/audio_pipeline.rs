mod common;

use common::fixtures::{calm_engine, wav_modulated, wav_noise, wav_sine, wav_stereo_sine};
use proctoring_core::{
    AnalysisError, AudioClip, AudioQuality, AudioQualityResult, DegradeCause, Stage,
    VoiceAnalysisResult,
};

#[test]
fn it_steady_tone_reads_as_calm_voice() {
    let engine = calm_engine();
    let clip = AudioClip::new(wav_sine(220.0, 1.0, 16_000)).expect("clip");
    let analysis = engine.analyze_voice(&clip).expect("voice analysis");

    assert!(!analysis.is_degraded());
    let voice = analysis.value();
    assert!(
        voice.stress_level < 20.0,
        "steady pitch, got stress {}",
        voice.stress_level
    );
    assert!(
        voice.tone_stability > 80.0,
        "steady energy, got stability {}",
        voice.tone_stability
    );
    assert!((0.0..=100.0).contains(&voice.confidence_index));
}

#[test]
fn it_speechlike_clip_scores_stay_in_range() {
    let engine = calm_engine();
    let clip = AudioClip::new(wav_modulated(2.0, 16_000)).expect("clip");
    let voice = engine
        .analyze_voice(&clip)
        .expect("voice analysis")
        .into_value();

    assert!((0.0..=100.0).contains(&voice.stress_level));
    assert!((0.0..=100.0).contains(&voice.confidence_index));
    assert!((0.0..=100.0).contains(&voice.tone_stability));
}

#[test]
fn it_corrupt_clip_degrades_voice_to_neutral() {
    let engine = calm_engine();
    let clip = AudioClip::new(vec![0x52, 0x49, 0x46, 0x46, 0x00, 0x01]).expect("clip");
    let analysis = engine.analyze_voice(&clip).expect("voice analysis");

    assert!(analysis.is_degraded());
    assert_eq!(analysis.value(), &VoiceAnalysisResult::default());
    let degradation = analysis.degradation().expect("degradation");
    assert_eq!(degradation.stage, Stage::Voice);
    assert_eq!(degradation.cause, DegradeCause::DecodeFailed);
    assert!(degradation.detail.is_some());
}

#[test]
fn it_empty_clip_is_rejected_up_front() {
    let engine = calm_engine();
    assert!(matches!(
        AudioClip::new(Vec::new()),
        Err(AnalysisError::EmptyAudio)
    ));

    let empty = AudioClip { bytes: Vec::new() };
    assert!(matches!(
        engine.analyze_voice(&empty),
        Err(AnalysisError::EmptyAudio)
    ));
    assert!(matches!(
        engine.analyze_audio_quality(&empty),
        Err(AnalysisError::EmptyAudio)
    ));
}

#[test]
fn it_pure_tone_reads_quiet() {
    let engine = calm_engine();
    let clip = AudioClip::new(wav_sine(440.0, 1.0, 16_000)).expect("clip");
    let analysis = engine.analyze_audio_quality(&clip).expect("noise analysis");

    assert!(!analysis.is_degraded());
    let quality = analysis.value();
    assert!(
        quality.noise_level < 30.0,
        "tone flatness should stay low, got {}",
        quality.noise_level
    );
    assert!(!quality.is_noisy);
    assert_eq!(quality.audio_quality, AudioQuality::Good);
}

#[test]
fn it_white_noise_reads_noisy() {
    let engine = calm_engine();
    let clip = AudioClip::new(wav_noise(1.0, 16_000)).expect("clip");
    let analysis = engine.analyze_audio_quality(&clip).expect("noise analysis");

    let quality = analysis.value();
    assert!(
        quality.is_noisy,
        "white noise flatness should exceed the threshold, got {}",
        quality.noise_level
    );
    assert_eq!(quality.audio_quality, AudioQuality::Poor);
}

#[test]
fn it_corrupt_clip_degrades_noise_to_unknown() {
    let engine = calm_engine();
    let clip = AudioClip::new(vec![1, 2, 3, 4]).expect("clip");
    let analysis = engine.analyze_audio_quality(&clip).expect("noise analysis");

    assert!(analysis.is_degraded());
    assert_eq!(analysis.value(), &AudioQualityResult::default());
    let degradation = analysis.degradation().expect("degradation");
    assert_eq!(degradation.stage, Stage::Noise);
    assert_eq!(degradation.cause, DegradeCause::DecodeFailed);
}

#[test]
fn it_stereo_clip_is_downmixed_and_analyzed() {
    let engine = calm_engine();
    let clip = AudioClip::new(wav_stereo_sine(330.0, 1.0, 16_000)).expect("clip");
    let analysis = engine.analyze_voice(&clip).expect("voice analysis");
    assert!(!analysis.is_degraded());
}

#[test]
fn it_audio_calls_land_in_stage_metrics() {
    let engine = calm_engine();
    let good = AudioClip::new(wav_sine(220.0, 0.5, 16_000)).expect("clip");
    let bad = AudioClip::new(vec![1, 2, 3, 4]).expect("clip");
    engine.analyze_voice(&good).expect("voice");
    engine.analyze_voice(&bad).expect("voice degraded");
    engine.analyze_audio_quality(&good).expect("noise");

    let snapshot = engine.metrics_registry().snapshot();
    assert_eq!(snapshot["voice"].call_count, 2);
    assert_eq!(snapshot["voice"].error_count, 1);
    assert_eq!(snapshot["noise"].call_count, 1);
    assert_eq!(snapshot["noise"].error_count, 0);
}

#[tokio::test]
async fn it_bounded_audio_paths_complete() {
    let engine = calm_engine();
    let voice = engine
        .analyze_voice_bounded(AudioClip::new(wav_sine(220.0, 0.5, 16_000)).expect("clip"))
        .await
        .expect("bounded voice");
    assert!(!voice.is_degraded());

    let noise = engine
        .analyze_audio_quality_bounded(AudioClip::new(wav_sine(220.0, 0.5, 16_000)).expect("clip"))
        .await
        .expect("bounded noise");
    assert!(!noise.is_degraded());
}
