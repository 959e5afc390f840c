//! Trait for pose-estimation inference backends.

use ndarray::{Array3, Axis};

use crate::pose::PoseDetection;

/// Trait for pose-estimation inference backends.
///
/// Implement this trait to connect any keypoint model to the sitting engine.
/// Keypoints must be normalized to [0, 1] and indexed by
/// [`Joint`](crate::Joint); undetected joints are reported as the origin.
///
/// # Example
///
/// ```ignore
/// use sitcount_rs::{PoseDetection, integration::KeypointSource};
///
/// struct MyPoseModel {
///     // Your model here
/// }
///
/// impl KeypointSource for MyPoseModel {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, input: &[u8], width: u32, height: u32) -> Result<Vec<PoseDetection>, Self::Error> {
///         // Run inference and return one detection per person
///         Ok(vec![])
///     }
/// }
/// ```
pub trait KeypointSource {
    /// Error type for inference failures.
    type Error;

    /// Run inference on raw image data and return one detection per person.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<PoseDetection>, Self::Error>;
}

/// Helper trait for converting model-specific keypoint outputs to `PoseDetection`.
pub trait IntoDetections {
    /// Convert the output into a vector of detections.
    fn into_detections(self) -> Vec<PoseDetection>;
}

impl IntoDetections for Vec<PoseDetection> {
    fn into_detections(self) -> Vec<PoseDetection> {
        self
    }
}

/// Keypoint tensor shaped `(persons, joints, channels)` with channels
/// `x, y` or `x, y, confidence`, as pose heads usually emit it.
impl IntoDetections for Array3<f32> {
    fn into_detections(self) -> Vec<PoseDetection> {
        self.axis_iter(Axis(0))
            .map(PoseDetection::from_rows)
            .collect()
    }
}
