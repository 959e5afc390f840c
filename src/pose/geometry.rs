//! Joint-angle and zone-membership primitives over normalized keypoints.

use nalgebra::Vector2;

use crate::pose::keypoint::Keypoint;

/// Angle reported when it cannot be measured. Reads as a straight limb, so a
/// leg with missing joints never counts as bent.
pub const MISSING_ANGLE: f32 = 180.0;

/// Angle in degrees at vertex `b` between the rays `b -> a` and `b -> c`.
///
/// Returns [`MISSING_ANGLE`] if any point is the missing sentinel, if either
/// ray has zero length, or if the inputs are not finite.
pub fn joint_angle(a: Keypoint, b: Keypoint, c: Keypoint) -> f32 {
    if a.is_missing() || b.is_missing() || c.is_missing() {
        return MISSING_ANGLE;
    }

    let v1 = Vector2::new(a.x - b.x, a.y - b.y);
    let v2 = Vector2::new(c.x - b.x, c.y - b.y);

    let mag_v1 = v1.norm();
    let mag_v2 = v2.norm();
    if mag_v1 == 0.0 || mag_v2 == 0.0 {
        return MISSING_ANGLE;
    }

    let cos_angle = v1.dot(&v2) / (mag_v1 * mag_v2);
    if !cos_angle.is_finite() {
        return MISSING_ANGLE;
    }

    // rounding can push |cos| slightly past 1
    cos_angle
        .clamp(-1.0, 1.0)
        .acos()
        .to_degrees()
        .clamp(0.0, MISSING_ANGLE)
}

/// Inclusive membership test in normalized coordinate space.
#[inline]
pub fn is_inside_rect(point: Keypoint, x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> bool {
    point.x >= x_min && point.x <= x_max && point.y >= y_min && point.y <= y_max
}

/// Average of two keypoints, falling back to whichever one is present.
/// `None` when both are missing.
pub fn midpoint(a: Keypoint, b: Keypoint) -> Option<Keypoint> {
    match (a.is_missing(), b.is_missing()) {
        (false, false) => Some(Keypoint::with_confidence(
            (a.x + b.x) / 2.0,
            (a.y + b.y) / 2.0,
            a.confidence.min(b.confidence),
        )),
        (false, true) => Some(a),
        (true, false) => Some(b),
        (true, true) => None,
    }
}
