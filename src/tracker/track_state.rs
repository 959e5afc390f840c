/// Temporal confirmation phase of a tracked identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// No sitting streak in progress
    #[default]
    Unseen,
    /// Counting consecutive sitting frames towards confirmation
    Accumulating,
    /// Sat long enough to be counted; terminal for the run
    Confirmed,
}

/// What a single frame's verdict did to a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Not sitting this frame
    Idle,
    /// Sitting, streak still below the threshold
    Accumulating { streak: u32 },
    /// Streak reached the threshold on this frame
    NewlyConfirmed,
    /// Sitting again after an earlier confirmation
    StillConfirmed,
}
