//! Per-identity tracking and confirmation state.

use crate::tracker::identity::PersonId;
use crate::tracker::track_state::{TrackState, Transition};

/// State kept for one identity for the lifetime of a run.
#[derive(Debug, Clone)]
pub struct Track {
    /// Identity handle
    pub id: PersonId,
    /// Last observed normalized x of the reference hip
    pub position_x: f32,
    /// Consecutive sitting frames, capped at the confirmation threshold
    pub streak: u32,
    /// Confirmation phase
    pub state: TrackState,
    /// Frame the identity was last matched
    pub frame_id: u32,
}

impl Track {
    pub fn new(id: PersonId, position_x: f32, frame_id: u32) -> Self {
        Self {
            id,
            position_x,
            streak: 0,
            state: TrackState::Unseen,
            frame_id,
        }
    }

    /// Move the track to the latest observed position.
    pub fn update(&mut self, position_x: f32, frame_id: u32) {
        self.position_x = position_x;
        self.frame_id = frame_id;
    }

    #[inline]
    pub fn is_confirmed(&self) -> bool {
        self.state == TrackState::Confirmed
    }

    /// Feed one frame's sitting verdict through the confirmation filter.
    ///
    /// A non-sitting frame wipes an unconfirmed streak. Once confirmed the
    /// track stays confirmed and the streak is frozen at the threshold.
    pub fn observe(&mut self, sitting: bool, threshold: u32) -> Transition {
        let threshold = threshold.max(1);

        if self.is_confirmed() {
            return if sitting {
                Transition::StillConfirmed
            } else {
                Transition::Idle
            };
        }

        if !sitting {
            self.streak = 0;
            self.state = TrackState::Unseen;
            return Transition::Idle;
        }

        self.streak = (self.streak + 1).min(threshold);
        if self.streak >= threshold {
            self.state = TrackState::Confirmed;
            Transition::NewlyConfirmed
        } else {
            self.state = TrackState::Accumulating;
            Transition::Accumulating {
                streak: self.streak,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> Track {
        Track::new(PersonId(0), 0.5, 1)
    }

    #[test]
    fn test_gap_resets_streak() {
        let mut t = track();
        let verdicts = [true, true, false, true, true, true];
        let transitions: Vec<Transition> = verdicts.iter().map(|&v| t.observe(v, 3)).collect();

        assert_eq!(
            transitions,
            vec![
                Transition::Accumulating { streak: 1 },
                Transition::Accumulating { streak: 2 },
                Transition::Idle,
                Transition::Accumulating { streak: 1 },
                Transition::Accumulating { streak: 2 },
                Transition::NewlyConfirmed,
            ]
        );
        assert!(t.is_confirmed());
    }

    #[test]
    fn test_confirmation_is_sticky() {
        let mut t = track();
        assert_eq!(t.observe(true, 2), Transition::Accumulating { streak: 1 });
        assert_eq!(t.observe(true, 2), Transition::NewlyConfirmed);
        assert_eq!(t.observe(false, 2), Transition::Idle);
        assert_eq!(t.state, TrackState::Confirmed);
        assert_eq!(t.streak, 2);
        assert_eq!(t.observe(true, 2), Transition::StillConfirmed);
    }

    #[test]
    fn test_zero_threshold_confirms_immediately() {
        let mut t = track();
        assert_eq!(t.observe(true, 0), Transition::NewlyConfirmed);
        assert_eq!(t.streak, 1);
    }

    #[test]
    fn test_update_overwrites_position_and_frame() {
        let mut t = track();
        t.update(0.58, 4);
        assert_eq!(t.position_x, 0.58);
        assert_eq!(t.frame_id, 4);
        assert_eq!(t.state, TrackState::Unseen);
    }

    #[test]
    fn test_reset_returns_to_unseen() {
        let mut t = track();
        t.observe(true, 5);
        assert_eq!(t.state, TrackState::Accumulating);
        t.observe(false, 5);
        assert_eq!(t.state, TrackState::Unseen);
        assert_eq!(t.streak, 0);
    }
}
