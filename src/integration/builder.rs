//! Builder for creating PoseDetection objects joint by joint.

use ndarray::ArrayView2;

use crate::pose::{JOINT_COUNT, Joint, Keypoint, PoseDetection, Rect};

/// Builder for creating `PoseDetection` objects.
///
/// Starts from a full vocabulary of missing keypoints, so only the joints a
/// model actually found need to be set.
#[derive(Debug, Clone)]
pub struct PoseBuilder {
    keypoints: Vec<Keypoint>,
    bbox: Option<Rect>,
    score: f32,
}

impl Default for PoseBuilder {
    fn default() -> Self {
        Self {
            keypoints: vec![Keypoint::MISSING; JOINT_COUNT],
            bbox: None,
            score: 1.0,
        }
    }
}

impl PoseBuilder {
    /// Create a new pose builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a joint to a fully confident normalized position.
    pub fn joint(self, joint: Joint, x: f32, y: f32) -> Self {
        self.joint_with_confidence(joint, x, y, 1.0)
    }

    pub fn joint_with_confidence(mut self, joint: Joint, x: f32, y: f32, confidence: f32) -> Self {
        self.keypoints[joint.index()] = Keypoint::with_confidence(x, y, confidence);
        self
    }

    /// Replace all keypoints from a `(joints, channels)` view. Joints the view
    /// does not cover are left missing.
    pub fn rows(mut self, rows: ArrayView2<'_, f32>) -> Self {
        self.keypoints = PoseDetection::from_rows(rows).keypoints;
        if self.keypoints.len() < JOINT_COUNT {
            self.keypoints.resize(JOINT_COUNT, Keypoint::MISSING);
        }
        self
    }

    /// Set bounding box in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.bbox = Some(Rect::from_tlbr(x1, y1, x2, y2));
        self
    }

    /// Set bounding box in XYWH format (center_x, center_y, width, height).
    pub fn xywh(mut self, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        self.bbox = Some(Rect::new(cx - w / 2.0, cy - h / 2.0, w, h));
        self
    }

    /// Set the person confidence score.
    pub fn score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }

    /// Build the final `PoseDetection`.
    pub fn build(self) -> PoseDetection {
        PoseDetection {
            keypoints: self.keypoints,
            bbox: self.bbox,
            score: self.score,
        }
    }
}
