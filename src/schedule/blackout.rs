use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::error::ScheduleError;
use crate::models::{Meeting, Section, TimeWindow, Weekday};

/// Weekly busy time: for each day, the windows a student is already committed.
///
/// Built once per filtering run and only read afterwards, so a single value can
/// be shared across threads evaluating different courses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BlackoutSchedule {
    days: BTreeMap<Weekday, Vec<TimeWindow>>,
}

impl BlackoutSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(mut self, day: Weekday, window: TimeWindow) -> Self {
        self.insert(day, window);
        self
    }

    /// Unions the meeting times of already committed sections.
    pub fn from_sections<'a, I>(sections: I) -> Self
    where
        I: IntoIterator<Item = &'a Section>,
    {
        Self::from_meetings(sections.into_iter().flat_map(|s| s.meetings.iter()))
    }

    /// Unions committed meetings. Whatever days and times a malformed meeting
    /// still carries are kept; busy time is never dropped for a stray letter.
    pub fn from_meetings<'a, I>(meetings: I) -> Self
    where
        I: IntoIterator<Item = &'a Meeting>,
    {
        meetings
            .into_iter()
            .fold(Self::default(), |mut schedule, meeting| {
                if let Meeting::Malformed { detail, partial } = meeting {
                    match partial {
                        Some(m) => {
                            warn!("keeping readable part {} of committed meeting: {}", m, detail)
                        }
                        None => warn!("committed meeting has no usable time: {}", detail),
                    }
                }
                if let Some(m) = meeting.known_window() {
                    for day in &m.days {
                        schedule.insert(*day, m.window);
                    }
                }
                schedule
            })
    }

    /// Builds a schedule from hand-entered busy windows keyed by day letter,
    /// e.g. `{"M": [["08:00", "09:00"]]}`.
    pub fn from_busy_windows(
        busy: &BTreeMap<String, Vec<(String, String)>>,
    ) -> Result<Self, ScheduleError> {
        let mut schedule = Self::default();
        for (key, windows) in busy {
            let mut chars = key.trim().chars();
            let day = match (chars.next().and_then(Weekday::from_letter), chars.next()) {
                (Some(day), None) => day,
                _ => return Err(ScheduleError::UnknownDay(key.clone())),
            };
            for (start, end) in windows {
                schedule.insert(day, TimeWindow::parse(start, end)?);
            }
        }
        Ok(schedule)
    }

    /// Union of two partial schedules, for building from partitioned input.
    pub fn merge(mut self, other: BlackoutSchedule) -> Self {
        for (day, windows) in other.days {
            for window in windows {
                self.insert(day, window);
            }
        }
        self
    }

    pub fn windows_on(&self, day: Weekday) -> &[TimeWindow] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of distinct windows across all days.
    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&mut self, day: Weekday, window: TimeWindow) {
        let windows = self.days.entry(day).or_default();
        if let Err(pos) = windows.binary_search(&window) {
            windows.insert(pos, window);
        }
    }
}
