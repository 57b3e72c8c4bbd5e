//! Time overlap, blackout schedule and per-section conflict checks.

pub mod blackout;
pub mod conflict;
pub mod overlap;

pub use blackout::BlackoutSchedule;
pub use conflict::{ConflictOutcome, check_conflict};
pub use overlap::{overlaps, overlaps_str};
