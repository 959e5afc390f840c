//! Burn inference backend for pose estimation.
//!
//! This module provides a `BurnPoseDetector` that implements `KeypointSource`
//! for running pose models built with the Burn framework.
//!
//! # Example
//!
//! ```ignore
//! use sitcount_rs::integration::{BurnPoseDetector, BurnPoseModel, RawPose};
//! use burn::backend::NdArray;
//!
//! // Implement BurnPoseModel for your pose model
//! struct MyYoloPose { /* ... */ }
//!
//! impl BurnPoseModel<NdArray> for MyYoloPose {
//!     fn forward(&self, input: burn::tensor::Tensor<NdArray, 4>) -> Vec<RawPose> {
//!         // Run inference
//!     }
//! }
//!
//! let model = MyYoloPose::load("model.bin");
//! let detector = BurnPoseDetector::new(model, Default::default());
//! ```

use super::{KeypointSource, PoseBuilder};
use crate::pose::{Keypoint, PoseDetection};
use burn::prelude::*;
use burn::tensor::Tensor;
use thiserror::Error;

/// Error type for Burn pose inference failures.
#[derive(Debug, Clone, Error)]
pub enum BurnPoseDetectorError {
    /// Input image has invalid dimensions.
    #[error("Invalid input dimensions: expected {expected:?}, got {got:?}")]
    InvalidInputDimensions {
        expected: (u32, u32, u32),
        got: (u32, u32, u32),
    },
    /// Preprocessing failed.
    #[error("Preprocessing error: {0}")]
    PreprocessingError(String),
}

/// Raw pose output from the model, in model-input pixel coordinates.
#[derive(Debug, Clone)]
pub struct RawPose {
    /// Person box: [x1, y1, x2, y2] or [cx, cy, w, h] depending on model
    pub bbox: [f32; 4],
    /// Person confidence score
    pub score: f32,
    /// Per-joint `[x, y, confidence]` in pixels, COCO-17 order
    pub keypoints: Vec<[f32; 3]>,
}

/// Trait for Burn-based pose models.
///
/// Implement this trait for your specific model architecture.
pub trait BurnPoseModel<B: Backend>: Send + Sync {
    /// Run forward pass on the input tensor.
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape [batch, channels, height, width]
    ///
    /// # Returns
    /// One raw pose per person, after NMS.
    fn forward(&self, input: Tensor<B, 4>) -> Vec<RawPose>;

    /// Get the expected input size (channels, height, width).
    fn input_size(&self) -> (u32, u32, u32) {
        (3, 640, 640) // Default YOLO-pose input size
    }

    /// Whether bbox output is in XYWH format (vs TLBR).
    fn bbox_is_xywh(&self) -> bool {
        true
    }
}

/// Burn-based pose detector implementing `KeypointSource`.
pub struct BurnPoseDetector<B: Backend, M: BurnPoseModel<B>> {
    model: M,
    device: B::Device,
    conf_threshold: f32,
}

impl<B: Backend, M: BurnPoseModel<B>> BurnPoseDetector<B, M> {
    /// Create a new Burn pose detector with the given model and device.
    pub fn new(model: M, device: B::Device) -> Self {
        Self {
            model,
            device,
            conf_threshold: 0.35,
        }
    }

    /// Set the person confidence threshold for filtering detections.
    pub fn with_conf_threshold(mut self, threshold: f32) -> Self {
        self.conf_threshold = threshold;
        self
    }

    /// Preprocess raw CHW image bytes to a Burn tensor.
    pub fn preprocess(
        &self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Tensor<B, 4>, BurnPoseDetectorError> {
        let (channels, target_h, target_w) = self.model.input_size();
        let expected_len = (width * height * channels) as usize;

        if input.len() != expected_len {
            return Err(BurnPoseDetectorError::InvalidInputDimensions {
                expected: (channels, height, width),
                got: (
                    channels,
                    height,
                    (input.len() as u32)
                        .checked_div(height * channels)
                        .unwrap_or(0),
                ),
            });
        }

        if height != target_h || width != target_w {
            return Err(BurnPoseDetectorError::PreprocessingError(format!(
                "Input size {}x{} doesn't match model size {}x{}. Resize not implemented.",
                width, height, target_w, target_h
            )));
        }

        let data: Vec<f32> = input.iter().map(|&x| x as f32 / 255.0).collect();
        let tensor = Tensor::<B, 1>::from_floats(data.as_slice(), &self.device).reshape([
            1,
            channels as usize,
            height as usize,
            width as usize,
        ]);

        Ok(tensor)
    }

    /// Normalize raw model poses into detections.
    ///
    /// Pixel keypoints at the origin stay at the origin so they keep reading
    /// as missing.
    fn postprocess(&self, raw_poses: Vec<RawPose>, width: u32, height: u32) -> Vec<PoseDetection> {
        let (w, h) = (width as f32, height as f32);
        raw_poses
            .into_iter()
            .filter(|p| p.score >= self.conf_threshold)
            .map(|p| {
                let builder = PoseBuilder::new().score(p.score);
                let builder = if self.model.bbox_is_xywh() {
                    builder.xywh(p.bbox[0], p.bbox[1], p.bbox[2], p.bbox[3])
                } else {
                    builder.tlbr(p.bbox[0], p.bbox[1], p.bbox[2], p.bbox[3])
                };
                let mut detection = builder.build();
                detection.keypoints = p
                    .keypoints
                    .iter()
                    .map(|&[x, y, confidence]| {
                        if x == 0.0 && y == 0.0 {
                            Keypoint::MISSING
                        } else {
                            Keypoint::with_confidence(x / w, y / h, confidence)
                        }
                    })
                    .collect();
                detection
            })
            .collect()
    }
}

impl<B: Backend, M: BurnPoseModel<B>> KeypointSource for BurnPoseDetector<B, M> {
    type Error = BurnPoseDetectorError;

    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<PoseDetection>, Self::Error> {
        let tensor = self.preprocess(input, width, height)?;
        let raw_poses = self.model.forward(tensor);
        Ok(self.postprocess(raw_poses, width, height))
    }
}
