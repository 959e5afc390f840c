//! Integration module for connecting pose-estimation backends with the sitting engine.
//!
//! This module provides traits and utilities for turning keypoint output from
//! various sources (live models, Burn, recorded JSON lines) into
//! [`PoseDetection`](crate::PoseDetection)s and feeding them to a
//! [`SittingEngine`](crate::SittingEngine) frame by frame.

mod builder;
mod detector;
mod pipeline;
mod replay;

pub use builder::PoseBuilder;
pub use detector::{IntoDetections, KeypointSource};
pub use pipeline::CountingPipeline;
pub use replay::{JsonLinesSource, ReplayError};

#[cfg(feature = "burn-backend")]
mod burn_backend;

#[cfg(feature = "burn-backend")]
pub use burn_backend::{BurnPoseDetector, BurnPoseDetectorError, BurnPoseModel, RawPose};
