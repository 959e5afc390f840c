//! Per-run engine tying classification, tracking, confirmation and counting together.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, EngineConfig};
use crate::pose::{Joint, PoseDetection, PostureClassifier, Reason, Rect};
use crate::tracker::identity::{IdentityTracker, PersonId};
use crate::tracker::track::Track;
use crate::tracker::track_state::Transition;
use crate::tracker::unique_counter::UniqueCounter;

/// Externally reported outcome for one detection (or for a whole frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// In the exclusion zone; neither tracked nor counted
    Masked,
    /// Confirmed sitting on this frame and counted for the first time
    SittingNew,
    /// Sitting, already counted
    SittingContinued,
    /// Sitting, streak not yet long enough to count
    SittingPending,
    NotSitting,
    /// Frame had no detections
    NoDetection,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Masked => "MASKED",
            Self::SittingNew => "SITTING_NEW",
            Self::SittingContinued => "SITTING_CONTINUED",
            Self::SittingPending => "SITTING_PENDING",
            Self::NotSitting => "NOT_SITTING",
            Self::NoDetection => "NO_DETECTION",
        }
    }

    pub fn is_sitting(&self) -> bool {
        matches!(
            self,
            Self::SittingNew | Self::SittingContinued | Self::SittingPending
        )
    }
}

/// Result for one detection of a frame.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionOutcome {
    /// Position of the detection in the frame's input
    pub index: usize,
    /// Assigned identity; `None` for masked and malformed detections
    pub identity: Option<PersonId>,
    pub verdict: Verdict,
    pub reason: Reason,
    /// Bounding box forwarded from the detection
    pub bbox: Option<Rect>,
}

/// Everything the engine decided about one frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    /// 1-based frame index within the run
    pub frame_id: u32,
    pub outcomes: Vec<DetectionOutcome>,
    /// Unique sitting count after this frame
    pub unique_count: usize,
}

impl FrameReport {
    /// Identities counted for the first time on this frame.
    pub fn newly_confirmed(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.outcomes
            .iter()
            .filter(|o| o.verdict == Verdict::SittingNew)
            .filter_map(|o| o.identity)
    }

    /// Single status for the frame: the last masked or sitting outcome wins,
    /// non-sitting outcomes only show when nothing else happened.
    pub fn headline(&self) -> Verdict {
        if self.outcomes.is_empty() {
            return Verdict::NoDetection;
        }
        self.outcomes
            .iter()
            .rev()
            .map(|o| o.verdict)
            .find(|v| *v == Verdict::Masked || v.is_sitting())
            .unwrap_or(Verdict::NotSitting)
    }
}

/// Sitting classifier plus identity tracker and unique counter for one run.
///
/// All mutable state lives here; build one engine per video and feed it frames
/// strictly in order.
#[derive(Debug, Clone)]
pub struct SittingEngine {
    config: EngineConfig,
    classifier: PostureClassifier,
    identities: IdentityTracker,
    counter: UniqueCounter,
    frame_id: u32,
}

impl SittingEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            classifier: PostureClassifier::new(&config),
            identities: IdentityTracker::new(config.proximity_threshold),
            counter: UniqueCounter::new(),
            frame_id: 0,
            config,
        }
    }

    /// Like [`SittingEngine::new`] but rejects an invalid configuration.
    pub fn try_new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Classify, track and count every detection of the next frame.
    pub fn process_frame(&mut self, detections: &[PoseDetection]) -> FrameReport {
        self.frame_id += 1;

        let outcomes = detections
            .iter()
            .enumerate()
            .map(|(index, detection)| self.process_detection(index, detection))
            .collect();

        FrameReport {
            frame_id: self.frame_id,
            outcomes,
            unique_count: self.counter.current_count(),
        }
    }

    fn process_detection(&mut self, index: usize, detection: &PoseDetection) -> DetectionOutcome {
        let detection = detection.gated(self.config.min_keypoint_confidence);
        let classification = self.classifier.classify(&detection);
        let outcome = |identity, verdict| DetectionOutcome {
            index,
            identity,
            verdict,
            reason: classification.reason,
            bbox: detection.bbox,
        };

        match classification.reason {
            Reason::Masked => {
                debug!(frame = self.frame_id, index, "detection masked");
                return outcome(None, Verdict::Masked);
            }
            Reason::Malformed => {
                warn!(
                    frame = self.frame_id,
                    index,
                    keypoints = detection.keypoints.len(),
                    "malformed detection"
                );
                return outcome(None, Verdict::NotSitting);
            }
            _ => {}
        }

        // well-formed, so the reference hip exists; a missing or non-finite hip
        // tracks at x = 0
        let position_x = detection
            .joint(Joint::LeftHip)
            .map(|hip| hip.x)
            .filter(|x| x.is_finite())
            .unwrap_or_default();
        let threshold = self.config.confirmation_threshold();
        let track = self.identities.assign(position_x, self.frame_id);
        let id = track.id;
        let transition = track.observe(classification.sitting, threshold);

        let verdict = match transition {
            Transition::NewlyConfirmed => {
                if self.counter.register_if_newly_confirmed(id) {
                    info!(
                        frame = self.frame_id,
                        %id,
                        count = self.counter.current_count(),
                        "new person counted"
                    );
                    Verdict::SittingNew
                } else {
                    Verdict::SittingContinued
                }
            }
            Transition::StillConfirmed => Verdict::SittingContinued,
            Transition::Accumulating { .. } => Verdict::SittingPending,
            Transition::Idle => Verdict::NotSitting,
        };

        debug!(
            frame = self.frame_id,
            index,
            %id,
            reason = ?classification.reason,
            verdict = verdict.as_str(),
            "detection classified"
        );
        outcome(Some(id), verdict)
    }

    /// Distinct identities confirmed sitting so far.
    #[inline]
    pub fn unique_count(&self) -> usize {
        self.counter.current_count()
    }

    /// Number of frames processed.
    #[inline]
    pub fn frame_index(&self) -> u32 {
        self.frame_id
    }

    pub fn track(&self, id: PersonId) -> Option<&Track> {
        self.identities.get(id)
    }

    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.identities.tracks()
    }

    pub fn confirmed_ids(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.counter.iter()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
