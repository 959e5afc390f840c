use serde::{Deserialize, Serialize};

use crate::pose::geometry::is_inside_rect;
use crate::pose::keypoint::Keypoint;

/// Person bounding box as reported by the pose model.
///
/// Stored as top-left corner plus size; coordinates are whatever space the
/// keypoint source uses (pixels for most models). The engine never reads it,
/// it only forwards it to renderers for label placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: f32,
    /// Top-left y coordinate
    pub y: f32,
    /// Width of the bounding box
    pub width: f32,
    /// Height of the bounding box
    pub height: f32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Anchor point for a status label: the top-left corner.
    #[inline]
    pub fn label_anchor(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Get the center point of the bounding box.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Axis-aligned region in normalized coordinates with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Zone {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl Default for Zone {
    fn default() -> Self {
        Self {
            x_min: 0.35,
            x_max: 0.65,
            y_min: 0.50,
            y_max: 0.80,
        }
    }
}

impl Zone {
    #[inline]
    pub fn new(x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Whether `point` lies inside the zone, boundaries included.
    #[inline]
    pub fn contains(&self, point: Keypoint) -> bool {
        is_inside_rect(point, self.x_min, self.x_max, self.y_min, self.y_max)
    }
}
