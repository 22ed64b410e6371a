//! Stress and confidence derivation from an emotion distribution.

use super::config::EmotionConfig;
use super::types::EmotionAssessment;
use crate::models::emotion::EmotionScores;

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Derive stress level and confidence index from a classifier output.
///
/// Stress sums the negative-affect labels and clamps at 100. Confidence is
/// the dominant label's own probability; a dominant label missing from its
/// own distribution scores the neutral confidence.
pub fn assess(scores: EmotionScores, cfg: &EmotionConfig) -> EmotionAssessment {
    if scores.is_empty() {
        return EmotionAssessment {
            emotions: scores,
            dominant_emotion: cfg.neutral_label.clone(),
            stress_level: 0.0,
            confidence_index: cfg.neutral_confidence_index,
        };
    }

    let dominant = match scores.dominant() {
        Some((label, _)) => label.to_string(),
        None => cfg.neutral_label.clone(),
    };

    let stress: f64 = cfg
        .stress_labels
        .iter()
        .map(|label| scores.get(label))
        .sum();
    let stress_level = stress.min(100.0);

    let confidence_index = if scores.0.contains_key(&dominant) {
        round1(scores.get(&dominant))
    } else {
        cfg.neutral_confidence_index
    };

    EmotionAssessment {
        emotions: scores,
        dominant_emotion: dominant,
        stress_level,
        confidence_index,
    }
}

/// Neutral default substituted when the classifier fails.
pub fn fallback(cfg: &EmotionConfig) -> EmotionAssessment {
    EmotionAssessment {
        emotions: EmotionScores::default(),
        dominant_emotion: cfg.neutral_label.clone(),
        stress_level: cfg.neutral_stress_level,
        confidence_index: cfg.neutral_confidence_index,
    }
}
