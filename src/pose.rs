mod classifier;
pub mod geometry;
mod keypoint;
mod rect;

pub use classifier::{Classification, PostureClassifier, Reason};
pub use keypoint::{JOINT_COUNT, Joint, Keypoint, PoseDetection};
pub use rect::{Rect, Zone};
