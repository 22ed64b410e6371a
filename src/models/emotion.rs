//! Emotion classification seam.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::frame::Frame;

/// Per-label emotion probabilities in percent, `0.0..=100.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmotionScores(pub HashMap<String, f64>);

impl EmotionScores {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Score for a label, `0.0` when absent.
    pub fn get(&self, label: &str) -> f64 {
        self.0.get(label).copied().unwrap_or(0.0)
    }

    /// The highest-scoring label. Ties break toward the lexicographically
    /// smaller label so repeated calls agree.
    pub fn dominant(&self) -> Option<(&str, f64)> {
        self.0
            .iter()
            .map(|(label, score)| (label.as_str(), *score))
            .max_by(|a, b| {
                a.1.partial_cmp(&b.1)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| b.0.cmp(a.0))
            })
    }
}

impl FromIterator<(String, f64)> for EmotionScores {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Emotion classification backend. Runs on a frame already known to
/// contain a face.
pub trait EmotionClassifier: Send + Sync {
    fn classify(&self, frame: &Frame) -> Result<EmotionScores, ModelError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(&str, f64)]) -> EmotionScores {
        pairs
            .iter()
            .map(|(label, score)| (label.to_string(), *score))
            .collect()
    }

    #[test]
    fn dominant_picks_highest() {
        let s = scores(&[("happy", 62.1), ("neutral", 20.0), ("sad", 17.9)]);
        let (label, score) = s.dominant().unwrap();
        assert_eq!(label, "happy");
        assert!((score - 62.1).abs() < 1e-12);
    }

    #[test]
    fn dominant_tie_breaks_deterministically() {
        let s = scores(&[("sad", 50.0), ("angry", 50.0)]);
        let (label, _) = s.dominant().unwrap();
        assert_eq!(label, "angry");
    }

    #[test]
    fn dominant_of_empty_is_none() {
        assert!(EmotionScores::default().dominant().is_none());
    }

    #[test]
    fn missing_label_scores_zero() {
        let s = scores(&[("happy", 80.0)]);
        assert_eq!(s.get("fear"), 0.0);
    }
}
