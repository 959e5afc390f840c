//! Horizontal-position identity tracker.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::tracker::track::Track;

/// Run-scoped handle for "the same person across consecutive frames".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PersonId(pub u64);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps detections to identities by the x coordinate of one reference hip.
///
/// Matching is first-hit in creation order, not nearest-by-distance: a
/// detection takes the oldest identity whose stored position is within the
/// proximity threshold. Identities are never dropped, and two detections in
/// one frame can land on the same identity.
#[derive(Debug, Clone)]
pub struct IdentityTracker {
    tracks: BTreeMap<PersonId, Track>,
    next_id: u64,
    proximity_threshold: f32,
}

impl IdentityTracker {
    pub fn new(proximity_threshold: f32) -> Self {
        Self {
            tracks: BTreeMap::new(),
            next_id: 0,
            proximity_threshold,
        }
    }

    /// Find or create the identity for a detection at `position_x` and move it
    /// there.
    pub fn assign(&mut self, position_x: f32, frame_id: u32) -> &mut Track {
        let matched = self
            .tracks
            .values()
            .find(|t| (t.position_x - position_x).abs() < self.proximity_threshold)
            .map(|t| t.id);

        let id = match matched {
            Some(id) => id,
            None => {
                let id = PersonId(self.next_id);
                self.next_id += 1;
                debug!(%id, position_x, frame_id, "new identity");
                id
            }
        };

        let track = self
            .tracks
            .entry(id)
            .or_insert_with(|| Track::new(id, position_x, frame_id));
        track.update(position_x, frame_id);
        track
    }

    pub fn get(&self, id: PersonId) -> Option<&Track> {
        self.tracks.get(&id)
    }

    /// All identities in creation order.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
