//! Sitting classification and unique-count engine driven by per-frame pose keypoints.
//!
//! Feed each frame's [`PoseDetection`]s into a [`SittingEngine`]; it decides per
//! detection whether the person is sitting in the bench zone, links detections
//! across frames with a lightweight horizontal-position tracker, debounces the
//! per-frame verdict over consecutive frames and counts every identity that was
//! ever confirmed sitting.

pub mod config;
pub mod integration;
pub mod pose;
pub mod tracker;

pub use config::{AngleRange, ConfigError, EngineConfig, PostureRule};
pub use pose::{Joint, Keypoint, PoseDetection, Rect, Zone};
pub use tracker::{DetectionOutcome, FrameReport, PersonId, SittingEngine, Verdict};
