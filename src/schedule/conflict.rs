use serde::Serialize;
use tracing::trace;

use crate::models::{Meeting, Section, TimeWindow, Weekday};
use crate::schedule::BlackoutSchedule;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ConflictOutcome {
    NoConflict,
    /// No meetings at all, or a meeting that could not be read. Blocks the
    /// section like a conflict but is reported separately.
    MissingTimeData { detail: String },
    Conflict {
        day: Weekday,
        blackout: TimeWindow,
        meeting: TimeWindow,
    },
}

impl ConflictOutcome {
    pub fn is_clear(&self) -> bool {
        matches!(self, ConflictOutcome::NoConflict)
    }
}

/// Tests every well-formed meeting of `section` against `blackout`.
///
/// The first overlapping blackout window found is reported. The readable
/// days of a malformed meeting are still scanned; the malformed meeting
/// itself only decides the outcome when nothing conflicts.
pub fn check_conflict(section: &Section, blackout: &BlackoutSchedule) -> ConflictOutcome {
    if section.meetings.is_empty() {
        return ConflictOutcome::MissingTimeData {
            detail: "No time data found (TBA?)".to_string(),
        };
    }

    let mut malformed: Option<&str> = None;

    for meeting in &section.meetings {
        if let Meeting::Malformed { detail, .. } = meeting {
            malformed.get_or_insert(detail.as_str());
        }

        let Some(m) = meeting.known_window() else {
            continue;
        };

        for day in &m.days {
            if let Some(busy) = blackout
                .windows_on(*day)
                .iter()
                .find(|busy| m.window.overlaps(busy))
            {
                trace!(
                    "section {} conflicts on {} at {} with {}",
                    section.id, day, m.window, busy
                );
                return ConflictOutcome::Conflict {
                    day: *day,
                    blackout: *busy,
                    meeting: m.window,
                };
            }
        }
    }

    match malformed {
        Some(detail) => ConflictOutcome::MissingTimeData {
            detail: detail.to_string(),
        },
        None => ConflictOutcome::NoConflict,
    }
}
