//! Gaze classification from eye landmarks.
//!
//! The iris centroid's horizontal position between the eye corners gives a
//! ratio in `[0, 1]`. A ratio near either corner means the pupil has swung
//! off-center. The band is deliberately lenient; it flags sustained
//! sideways gaze, not saccades.

use super::config::GazeConfig;
use super::types::GazeDirection;
use crate::geometry::{centroid, Point2};
use crate::models::face::{EyeLandmarks, LandmarkSet};

/// Iris offset ratio for one eye, measured in pixel space so aspect ratio
/// is respected. Zero eye width falls back to the center ratio.
pub fn eye_ratio(eye: &EyeLandmarks, width: f64, height: f64, cfg: &GazeConfig) -> f64 {
    let iris: Vec<Point2> = eye.iris.iter().map(|p| p.scaled(width, height)).collect();
    let iris_center = centroid(&iris);
    let inner = eye.inner_corner.scaled(width, height);
    let outer = eye.outer_corner.scaled(width, height);

    let eye_width = outer.distance(&inner);
    if eye_width > 0.0 {
        iris_center.distance(&inner) / eye_width
    } else {
        cfg.fallback_ratio
    }
}

fn eye_is_away(eye: &EyeLandmarks, width: f64, height: f64, cfg: &GazeConfig) -> bool {
    let ratio = eye_ratio(eye, width, height, cfg);
    ratio < cfg.away_ratio_low || ratio > cfg.away_ratio_high
}

/// Classify one landmark set. Either eye out of band reads as `Away`.
pub fn classify(
    landmarks: &LandmarkSet,
    frame_width: u32,
    frame_height: u32,
    cfg: &GazeConfig,
) -> GazeDirection {
    let w = frame_width as f64;
    let h = frame_height as f64;
    if eye_is_away(&landmarks.left_eye, w, h, cfg) || eye_is_away(&landmarks.right_eye, w, h, cfg) {
        GazeDirection::Away
    } else {
        GazeDirection::Center
    }
}
