//! Face detection and eye landmark extraction seam.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::frame::Frame;
use crate::geometry::Point2;

/// Axis-aligned face bounding box in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub confidence: f64,
}

/// Normalized landmarks for a single eye: the two horizontal corners and
/// four points ringing the iris.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeLandmarks {
    pub inner_corner: Point2,
    pub outer_corner: Point2,
    pub iris: [Point2; 4],
}

/// Eye landmarks for one detected face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkSet {
    pub left_eye: EyeLandmarks,
    pub right_eye: EyeLandmarks,
}

/// Index layout mapping a dense facial mesh onto the eye landmarks this
/// pipeline consumes. Decouples gaze math from any one mesh vendor.
#[derive(Debug, Clone, Copy)]
pub struct EyeTopology {
    pub left_inner: usize,
    pub left_outer: usize,
    pub left_iris: [usize; 4],
    pub right_inner: usize,
    pub right_outer: usize,
    pub right_iris: [usize; 4],
}

/// Topology of the 478-point refined face mesh with iris landmarks.
pub const REFINED_MESH_478: EyeTopology = EyeTopology {
    left_inner: 362,
    left_outer: 263,
    left_iris: [474, 475, 476, 477],
    right_inner: 133,
    right_outer: 33,
    right_iris: [469, 470, 471, 472],
};

impl LandmarkSet {
    /// Pick the eye landmarks out of a dense indexed mesh. Returns `None`
    /// when the mesh is too short for the topology.
    pub fn from_indexed(points: &[Point2], topo: &EyeTopology) -> Option<Self> {
        let at = |i: usize| points.get(i).copied();
        let iris = |idx: &[usize; 4]| -> Option<[Point2; 4]> {
            Some([at(idx[0])?, at(idx[1])?, at(idx[2])?, at(idx[3])?])
        };
        Some(Self {
            left_eye: EyeLandmarks {
                inner_corner: at(topo.left_inner)?,
                outer_corner: at(topo.left_outer)?,
                iris: iris(&topo.left_iris)?,
            },
            right_eye: EyeLandmarks {
                inner_corner: at(topo.right_inner)?,
                outer_corner: at(topo.right_outer)?,
                iris: iris(&topo.right_iris)?,
            },
        })
    }
}

/// Everything the face backend saw in one frame.
///
/// `boxes` and `landmark_sets` come from separate model heads and may
/// disagree in count; the pipeline treats them independently.
#[derive(Debug, Clone, Default)]
pub struct FaceObservations {
    pub boxes: Vec<FaceBox>,
    pub landmark_sets: Vec<LandmarkSet>,
}

impl FaceObservations {
    pub fn face_count(&self) -> usize {
        self.boxes.len()
    }

    pub fn detected(&self) -> bool {
        !self.boxes.is_empty()
    }
}

/// Face detection backend.
pub trait FaceAnalyzer: Send + Sync {
    fn detect(&self, frame: &Frame) -> Result<FaceObservations, ModelError>;
}
