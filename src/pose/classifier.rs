//! Per-detection sitting verdict from leg posture and hip placement.

use serde::Serialize;

use crate::config::{AngleRange, EngineConfig, PostureRule};
use crate::pose::geometry::{joint_angle, midpoint};
use crate::pose::keypoint::{Joint, PoseDetection};
use crate::pose::rect::Zone;

/// Why a detection got its verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    /// Hip midpoint lies in the exclusion zone
    Masked,
    /// Both hips on the bench and at least one leg bent
    InZoneSitting,
    /// Both hips on the bench but no leg bent
    InZoneStanding,
    /// At least one hip off the bench
    OutOfZone,
    /// Fewer keypoints than the joint vocabulary
    Malformed,
}

/// Result of classifying one detection in isolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Posture and spatial checks both passed
    pub sitting: bool,
    pub reason: Reason,
    /// At least one leg bent
    pub posture: bool,
    /// Both hips inside the bench zone
    pub on_bench: bool,
}

impl Classification {
    fn rejected(reason: Reason) -> Self {
        Self {
            sitting: false,
            reason,
            posture: false,
            on_bench: false,
        }
    }

    #[inline]
    pub fn is_masked(&self) -> bool {
        self.reason == Reason::Masked
    }
}

/// Stateless sitting classifier.
///
/// The exclusion check fails open (a person whose hips cannot be located is
/// never masked) while the sitting check fails closed (anything it cannot
/// measure is "not sitting").
#[derive(Debug, Clone)]
pub struct PostureClassifier {
    exclusion_x_max: f32,
    bench: Zone,
    knee_angle: AngleRange,
    rule: PostureRule,
}

impl PostureClassifier {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            exclusion_x_max: config.exclusion_x_max,
            bench: config.bench,
            knee_angle: config.knee_angle,
            rule: config.posture,
        }
    }

    pub fn classify(&self, detection: &PoseDetection) -> Classification {
        if !detection.is_well_formed() {
            return Classification::rejected(Reason::Malformed);
        }
        if self.is_excluded(detection) {
            return Classification::rejected(Reason::Masked);
        }

        let posture = self.is_posture_sitting(detection);
        let on_bench = self.is_on_bench(detection);
        let reason = match (on_bench, posture) {
            (true, true) => Reason::InZoneSitting,
            (true, false) => Reason::InZoneStanding,
            (false, _) => Reason::OutOfZone,
        };

        Classification {
            sitting: posture && on_bench,
            reason,
            posture,
            on_bench,
        }
    }

    /// Whether the hip midpoint falls left of the exclusion threshold.
    pub fn is_excluded(&self, detection: &PoseDetection) -> bool {
        let (Some(left), Some(right)) = (
            detection.joint(Joint::LeftHip),
            detection.joint(Joint::RightHip),
        ) else {
            return false;
        };
        match midpoint(left, right) {
            Some(mid) => mid.x < self.exclusion_x_max,
            None => false,
        }
    }

    /// Whether at least one leg satisfies the configured posture rule.
    pub fn is_posture_sitting(&self, detection: &PoseDetection) -> bool {
        let legs = [
            (Joint::LeftHip, Joint::LeftKnee, Joint::LeftAnkle),
            (Joint::RightHip, Joint::RightKnee, Joint::RightAnkle),
        ];

        match self.rule {
            PostureRule::KneeAngle => legs.iter().any(|&(hip, knee, ankle)| {
                match (
                    detection.joint(hip),
                    detection.joint(knee),
                    detection.joint(ankle),
                ) {
                    (Some(h), Some(k), Some(a)) => self.knee_angle.contains(joint_angle(h, k, a)),
                    _ => false,
                }
            }),
            PostureRule::HipKneeLevel {
                max_drop,
                min_hip_y,
            } => {
                let hips_low = [Joint::LeftHip, Joint::RightHip].iter().all(|&hip| {
                    detection
                        .joint(hip)
                        .is_some_and(|h| !h.is_missing() && h.y > min_hip_y)
                });
                hips_low
                    && legs.iter().any(|&(hip, knee, _)| {
                        match (detection.joint(hip), detection.joint(knee)) {
                            (Some(h), Some(k)) if !h.is_missing() && !k.is_missing() => {
                                (h.y - k.y).abs() < max_drop
                            }
                            _ => false,
                        }
                    })
            }
        }
    }

    /// Whether both hips lie inside the bench zone.
    pub fn is_on_bench(&self, detection: &PoseDetection) -> bool {
        [Joint::LeftHip, Joint::RightHip].iter().all(|&hip| {
            detection
                .joint(hip)
                .is_some_and(|point| self.bench.contains(point))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::PoseBuilder;

    fn config() -> EngineConfig {
        EngineConfig::default().with_bench(Zone::new(0.35, 0.65, 0.40, 0.80))
    }

    /// Seated pose: thighs horizontal, shins at `knee_deg` from the thigh.
    fn seated(left_hip: (f32, f32), right_hip: (f32, f32), knee_deg: f32) -> PoseBuilder {
        let rad = knee_deg.to_radians();
        let (dx, dy) = (-0.1 * rad.cos(), 0.1 * rad.sin());
        PoseBuilder::new()
            .joint(Joint::LeftHip, left_hip.0, left_hip.1)
            .joint(Joint::RightHip, right_hip.0, right_hip.1)
            .joint(Joint::LeftKnee, left_hip.0 + 0.1, left_hip.1)
            .joint(Joint::RightKnee, right_hip.0 + 0.1, right_hip.1)
            .joint(Joint::LeftAnkle, left_hip.0 + 0.1 + dx, left_hip.1 + dy)
            .joint(Joint::RightAnkle, right_hip.0 + 0.1 + dx, right_hip.1 + dy)
    }

    #[test]
    fn test_sitting_in_zone() {
        let classifier = PostureClassifier::new(&config());
        let det = seated((0.45, 0.60), (0.50, 0.60), 100.0).build();
        let result = classifier.classify(&det);
        assert!(result.sitting);
        assert_eq!(result.reason, Reason::InZoneSitting);
    }

    #[test]
    fn test_standing_in_zone() {
        let classifier = PostureClassifier::new(&config());
        let det = seated((0.45, 0.60), (0.50, 0.60), 170.0).build();
        let result = classifier.classify(&det);
        assert!(!result.sitting);
        assert!(result.on_bench);
        assert_eq!(result.reason, Reason::InZoneStanding);
    }

    #[test]
    fn test_one_bent_leg_is_enough() {
        let classifier = PostureClassifier::new(&config());
        let det = seated((0.45, 0.60), (0.50, 0.60), 100.0)
            .joint(Joint::RightAnkle, 0.0, 0.0)
            .build();
        assert!(classifier.is_posture_sitting(&det));
    }

    #[test]
    fn test_missing_legs_fail_closed() {
        let classifier = PostureClassifier::new(&config());
        let det = PoseBuilder::new()
            .joint(Joint::LeftHip, 0.45, 0.60)
            .joint(Joint::RightHip, 0.50, 0.60)
            .build();
        let result = classifier.classify(&det);
        assert!(!result.sitting);
        assert_eq!(result.reason, Reason::InZoneStanding);
    }

    #[test]
    fn test_exclusion_uses_hip_midpoint() {
        let classifier = PostureClassifier::new(&config());
        let masked = seated((0.20, 0.60), (0.22, 0.60), 100.0).build();
        assert!(classifier.classify(&masked).is_masked());

        // midpoint 0.36 is right of the line even though the left hip is not
        let straddling = seated((0.30, 0.60), (0.42, 0.60), 100.0).build();
        assert!(!classifier.is_excluded(&straddling));
    }

    #[test]
    fn test_exclusion_fails_open() {
        let classifier = PostureClassifier::new(&config());
        let det = PoseBuilder::new().build();
        assert!(!classifier.is_excluded(&det));
        assert_eq!(classifier.classify(&det).reason, Reason::OutOfZone);
    }

    #[test]
    fn test_exclusion_single_hip() {
        let classifier = PostureClassifier::new(&config());
        let det = PoseBuilder::new().joint(Joint::RightHip, 0.1, 0.6).build();
        assert!(classifier.is_excluded(&det));
    }

    #[test]
    fn test_malformed_detection() {
        let classifier = PostureClassifier::new(&config());
        let det = PoseDetection::new(vec![crate::pose::Keypoint::new(0.5, 0.5); 12]);
        let result = classifier.classify(&det);
        assert!(!result.sitting);
        assert_eq!(result.reason, Reason::Malformed);
    }

    #[test]
    fn test_hip_knee_level_rule() {
        let rule = PostureRule::HipKneeLevel {
            max_drop: 0.15,
            min_hip_y: 0.4,
        };
        let classifier = PostureClassifier::new(&config().with_posture(rule));

        let level = seated((0.45, 0.60), (0.50, 0.60), 90.0).build();
        assert!(classifier.classify(&level).sitting);

        let upright = PoseBuilder::new()
            .joint(Joint::LeftHip, 0.45, 0.60)
            .joint(Joint::RightHip, 0.50, 0.60)
            .joint(Joint::LeftKnee, 0.45, 0.78)
            .joint(Joint::RightKnee, 0.50, 0.78)
            .build();
        assert!(!classifier.is_posture_sitting(&upright));

        let no_knees = PoseBuilder::new()
            .joint(Joint::LeftHip, 0.45, 0.60)
            .joint(Joint::RightHip, 0.50, 0.60)
            .build();
        assert!(!classifier.is_posture_sitting(&no_knees));
    }
}
