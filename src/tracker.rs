mod engine;
mod identity;
mod track;
mod track_state;
mod unique_counter;

pub use engine::{DetectionOutcome, FrameReport, SittingEngine, Verdict};
pub use identity::{IdentityTracker, PersonId};
pub use track::Track;
pub use track_state::{TrackState, Transition};
pub use unique_counter::UniqueCounter;
