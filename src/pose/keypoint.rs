//! Keypoint vocabulary and per-person pose detections.

use std::borrow::Cow;

use ndarray::ArrayView2;

use crate::pose::rect::Rect;

/// Number of joints in the COCO keypoint vocabulary.
pub const JOINT_COUNT: usize = 17;

/// COCO-17 joint vocabulary, in pose-model output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl Joint {
    /// Position of this joint in a detection's keypoint array.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A single joint location in normalized image coordinates.
///
/// Undetected joints are reported by the pose model as the origin; see
/// [`Keypoint::is_missing`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    /// Normalized x coordinate in [0, 1]
    pub x: f32,
    /// Normalized y coordinate in [0, 1]
    pub y: f32,
    /// Model confidence / visibility in [0, 1]
    pub confidence: f32,
}

impl Default for Keypoint {
    fn default() -> Self {
        Self::MISSING
    }
}

impl Keypoint {
    /// Sentinel for an undetected joint.
    pub const MISSING: Keypoint = Keypoint {
        x: 0.0,
        y: 0.0,
        confidence: 0.0,
    };

    /// Create a fully confident keypoint.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self::with_confidence(x, y, 1.0)
    }

    #[inline]
    pub fn with_confidence(x: f32, y: f32, confidence: f32) -> Self {
        Self { x, y, confidence }
    }

    /// Whether this keypoint is the origin sentinel.
    #[inline]
    pub fn is_missing(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// One person's keypoints in one frame.
#[derive(Debug, Clone, Default)]
pub struct PoseDetection {
    /// Keypoints indexed by [`Joint::index`]
    pub keypoints: Vec<Keypoint>,
    /// Optional person bounding box, passed through for label placement
    pub bbox: Option<Rect>,
    /// Person detection confidence
    pub score: f32,
}

impl PoseDetection {
    pub fn new(keypoints: Vec<Keypoint>) -> Self {
        Self {
            keypoints,
            bbox: None,
            score: 1.0,
        }
    }

    pub fn with_bbox(mut self, bbox: Rect) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// Build a detection from a `(joints, channels)` view where each row is
    /// `x, y` or `x, y, confidence`. Views with fewer than two columns yield
    /// an empty (malformed) detection.
    pub fn from_rows(rows: ArrayView2<'_, f32>) -> Self {
        let (_, cols) = rows.dim();
        if cols < 2 {
            return Self::new(Vec::new());
        }
        let keypoints = rows
            .rows()
            .into_iter()
            .map(|row| {
                let confidence = if cols >= 3 { row[2] } else { 1.0 };
                Keypoint::with_confidence(row[0], row[1], confidence)
            })
            .collect();
        Self::new(keypoints)
    }

    /// Whether the detection covers the whole joint vocabulary.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.keypoints.len() >= JOINT_COUNT
    }

    /// Keypoint for `joint`, or `None` if the detection is too short to hold it.
    #[inline]
    pub fn joint(&self, joint: Joint) -> Option<Keypoint> {
        self.keypoints.get(joint.index()).copied()
    }

    /// This detection with keypoints below `min_confidence` replaced by the
    /// missing sentinel. A threshold of zero borrows the detection unchanged.
    pub fn gated(&self, min_confidence: f32) -> Cow<'_, PoseDetection> {
        if min_confidence <= 0.0 {
            return Cow::Borrowed(self);
        }
        let keypoints = self
            .keypoints
            .iter()
            .map(|kp| {
                if kp.confidence < min_confidence {
                    Keypoint::MISSING
                } else {
                    *kp
                }
            })
            .collect();
        Cow::Owned(PoseDetection {
            keypoints,
            bbox: self.bbox,
            score: self.score,
        })
    }
}
