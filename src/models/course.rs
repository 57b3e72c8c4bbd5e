use std::collections::BTreeSet;
use std::fmt;

use crate::error::ScheduleError;
use crate::models::time::{TimeWindow, Weekday};

/// One time range repeated on each of `days`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingWindow {
    pub days: Vec<Weekday>,
    pub window: TimeWindow,
}

impl fmt::Display for MeetingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days: String = self.days.iter().map(Weekday::letter).collect();
        write!(f, "{} {}", days, self.window)
    }
}

/// A meeting as it came out of the catalog. Incomplete or unparseable
/// meetings are kept so the conflict check can refuse to treat them as free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Meeting {
    Scheduled(MeetingWindow),
    Malformed {
        detail: String,
        /// The teaching days and time that could still be read, when only
        /// part of the day string was unrecognised (e.g. `"M S"`).
        partial: Option<MeetingWindow>,
    },
}

impl Meeting {
    /// Builds a meeting from the optional raw catalog fields.
    pub fn parse(days: Option<&str>, begin: Option<&str>, end: Option<&str>) -> Self {
        let (days, begin, end) = match (
            days.map(str::trim).filter(|d| !d.is_empty()),
            begin.map(str::trim).filter(|b| !b.is_empty()),
            end.map(str::trim).filter(|e| !e.is_empty()),
        ) {
            (Some(d), Some(b), Some(e)) => (d, b, e),
            _ => return Meeting::malformed("Incomplete time or day information"),
        };

        let window = match TimeWindow::parse(begin, end) {
            Ok(window) => window,
            Err(e) => return Meeting::malformed(e.to_string()),
        };

        let (known, unknown) = Weekday::split_days(days);
        let readable = (!known.is_empty()).then(|| MeetingWindow {
            days: known,
            window,
        });

        match (readable, unknown.is_empty()) {
            (Some(m), true) => Meeting::Scheduled(m),
            (partial, _) => Meeting::Malformed {
                detail: ScheduleError::UnknownDay(unknown).to_string(),
                partial,
            },
        }
    }

    pub fn scheduled(days: &[Weekday], window: TimeWindow) -> Self {
        Meeting::Scheduled(MeetingWindow {
            days: days.to_vec(),
            window,
        })
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Meeting::Malformed {
            detail: detail.into(),
            partial: None,
        }
    }

    pub fn as_scheduled(&self) -> Option<&MeetingWindow> {
        match self {
            Meeting::Scheduled(m) => Some(m),
            Meeting::Malformed { .. } => None,
        }
    }

    /// Every day and time that can be read, including what survives in a
    /// partially malformed meeting.
    pub fn known_window(&self) -> Option<&MeetingWindow> {
        match self {
            Meeting::Scheduled(m) => Some(m),
            Meeting::Malformed { partial, .. } => partial.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Enroll code.
    pub id: String,
    /// Section number as printed in the catalog, e.g. `0101`.
    pub label: Option<String>,
    pub capacity: u32,
    pub enrolled_count: u32,
    /// Empty means the meeting times are still TBA.
    pub meetings: Vec<Meeting>,
    /// Lecture rather than discussion or lab.
    pub is_primary: bool,
}

impl Section {
    pub fn new(id: impl Into<String>, capacity: u32, enrolled_count: u32) -> Self {
        Self {
            id: id.into(),
            label: None,
            capacity,
            enrolled_count,
            meetings: Vec::new(),
            is_primary: true,
        }
    }

    pub fn with_meeting(mut self, meeting: Meeting) -> Self {
        self.meetings.push(meeting);
        self
    }

    pub fn secondary(mut self) -> Self {
        self.is_primary = false;
        self
    }

    pub fn is_full(&self) -> bool {
        self.enrolled_count >= self.capacity
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: String,
    pub title: Option<String>,
    pub subject: String,
    pub ge_tags: BTreeSet<String>,
    pub is_online: bool,
    pub sections: Vec<Section>,
}

impl Course {
    pub fn new(id: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            subject: subject.into(),
            ge_tags: BTreeSet::new(),
            is_online: false,
            sections: Vec::new(),
        }
    }

    pub fn with_ge(mut self, code: impl Into<String>) -> Self {
        self.ge_tags.insert(code.into());
        self
    }

    pub fn online(mut self) -> Self {
        self.is_online = true;
        self
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// The first lecture section, if the catalog marks one.
    pub fn primary_section(&self) -> Option<&Section> {
        self.sections.iter().find(|s| s.is_primary)
    }
}
