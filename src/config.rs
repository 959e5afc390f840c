//! Engine configuration: zone bounds, posture thresholds and tracking knobs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pose::Zone;

/// Errors raised while loading or validating an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Closed interval of knee angles, in degrees, that count as a bent leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AngleRange {
    pub min_deg: f32,
    pub max_deg: f32,
}

impl Default for AngleRange {
    fn default() -> Self {
        Self {
            min_deg: 75.0,
            max_deg: 125.0,
        }
    }
}

impl AngleRange {
    pub fn new(min_deg: f32, max_deg: f32) -> Self {
        Self { min_deg, max_deg }
    }

    #[inline]
    pub fn contains(&self, angle: f32) -> bool {
        angle >= self.min_deg && angle <= self.max_deg
    }
}

/// Which leg test decides the posture half of the sitting verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum PostureRule {
    /// Hip-knee-ankle angle within [`EngineConfig::knee_angle`] on either leg
    #[default]
    KneeAngle,
    /// Thigh roughly level: `|hip.y - knee.y| < max_drop` on either leg, and
    /// both hips lower in the frame than `min_hip_y`
    HipKneeLevel { max_drop: f32, min_hip_y: f32 },
}

/// Configuration consumed by [`SittingEngine`](crate::SittingEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Detections whose hip midpoint x is below this are masked out entirely
    pub exclusion_x_max: f32,
    /// Region both hips must occupy for a sitting verdict
    pub bench: Zone,
    /// Knee angle interval for [`PostureRule::KneeAngle`]
    pub knee_angle: AngleRange,
    pub posture: PostureRule,
    /// Max horizontal hip distance (normalized) to reuse an identity
    pub proximity_threshold: f32,
    /// Consecutive sitting frames before an identity is counted; 0 and 1 both
    /// confirm on the first sitting frame
    pub confirmation_frames: u32,
    /// Keypoints below this confidence are treated as undetected
    pub min_keypoint_confidence: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            exclusion_x_max: 0.35,
            bench: Zone::default(),
            knee_angle: AngleRange::default(),
            posture: PostureRule::KneeAngle,
            proximity_threshold: 0.1,
            confirmation_frames: 30,
            min_keypoint_confidence: 0.0,
        }
    }
}

impl EngineConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Set the exclusion threshold.
    pub fn with_exclusion_x_max(mut self, x_max: f32) -> Self {
        self.exclusion_x_max = x_max;
        self
    }

    pub fn with_bench(mut self, bench: Zone) -> Self {
        self.bench = bench;
        self
    }

    pub fn with_knee_angle(mut self, min_deg: f32, max_deg: f32) -> Self {
        self.knee_angle = AngleRange::new(min_deg, max_deg);
        self
    }

    pub fn with_posture(mut self, posture: PostureRule) -> Self {
        self.posture = posture;
        self
    }

    pub fn with_proximity_threshold(mut self, threshold: f32) -> Self {
        self.proximity_threshold = threshold;
        self
    }

    pub fn with_confirmation_frames(mut self, frames: u32) -> Self {
        self.confirmation_frames = frames;
        self
    }

    pub fn with_min_keypoint_confidence(mut self, confidence: f32) -> Self {
        self.min_keypoint_confidence = confidence;
        self
    }

    /// Effective streak length needed for confirmation, never below 1.
    #[inline]
    pub fn confirmation_threshold(&self) -> u32 {
        self.confirmation_frames.max(1)
    }

    /// Check every constraint of the configuration surface.
    pub fn validate(&self) -> Result<(), ConfigError> {
        unit_interval("exclusion_x_max", self.exclusion_x_max)?;

        let bench = &self.bench;
        for (field, value) in [
            ("bench.x_min", bench.x_min),
            ("bench.x_max", bench.x_max),
            ("bench.y_min", bench.y_min),
            ("bench.y_max", bench.y_max),
        ] {
            unit_interval(field, value)?;
        }
        if bench.x_min >= bench.x_max {
            return Err(invalid("bench", "x_min must be less than x_max"));
        }
        if bench.y_min >= bench.y_max {
            return Err(invalid("bench", "y_min must be less than y_max"));
        }

        let knee = &self.knee_angle;
        for (field, value) in [
            ("knee_angle.min_deg", knee.min_deg),
            ("knee_angle.max_deg", knee.max_deg),
        ] {
            if !(0.0..=180.0).contains(&value) {
                return Err(invalid(field, format!("{value} is outside [0, 180]")));
            }
        }
        if knee.min_deg >= knee.max_deg {
            return Err(invalid("knee_angle", "min_deg must be less than max_deg"));
        }

        if let PostureRule::HipKneeLevel {
            max_drop,
            min_hip_y,
        } = self.posture
        {
            unit_interval("posture.max_drop", max_drop)?;
            unit_interval("posture.min_hip_y", min_hip_y)?;
        }

        if !self.proximity_threshold.is_finite() || self.proximity_threshold < 0.0 {
            return Err(invalid(
                "proximity_threshold",
                format!("{} must be a non-negative number", self.proximity_threshold),
            ));
        }

        unit_interval("min_keypoint_confidence", self.min_keypoint_confidence)
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn unit_interval(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} is outside [0, 1]")))
    }
}
