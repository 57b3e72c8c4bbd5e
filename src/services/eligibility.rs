use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{Course, Weekday};
use crate::schedule::{BlackoutSchedule, ConflictOutcome, check_conflict};

pub const WRONG_SUBJECT: &str = "wrong subject";
pub const MISSING_GE_AREA: &str = "missing GE area";
pub const NOT_ONLINE: &str = "not online";
pub const NO_SECTIONS: &str = "no sections offered";

/// Course-level filters. An unset field is not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Criteria {
    pub subject: Option<String>,
    pub ge: Option<String>,
    /// Only `Some(true)` filters; `Some(false)` behaves like `None`.
    pub online_required: Option<bool>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_ge(mut self, ge: impl Into<String>) -> Self {
        self.ge = Some(ge.into());
        self
    }

    pub fn require_online(mut self, required: bool) -> Self {
        self.online_required = Some(required);
        self
    }

    fn gate(&self, course: &Course) -> Option<&'static str> {
        if let Some(subject) = &self.subject {
            if normalize(subject) != normalize(&course.subject) {
                return Some(WRONG_SUBJECT);
            }
        }

        if let Some(ge) = &self.ge {
            let wanted = normalize(ge);
            if !course.ge_tags.iter().any(|tag| normalize(tag) == wanted) {
                return Some(MISSING_GE_AREA);
            }
        }

        if self.online_required == Some(true) && !course.is_online {
            return Some(NOT_ONLINE);
        }

        None
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionOutcome {
    Full { enrolled: u32, capacity: u32 },
    Conflict { day: Weekday, detail: String },
    MissingTimeData { detail: String },
    Eligible,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResult {
    pub course_accepted: bool,
    /// In section order.
    pub accepted_section_ids: Vec<String>,
    pub rejection_reasons: Vec<String>,
    pub per_section_outcome: BTreeMap<String, SectionOutcome>,
    /// Sections skipped because their meeting times are missing or unreadable.
    pub warnings: Vec<String>,
}

impl EligibilityResult {
    fn gated(reason: &str) -> Self {
        Self {
            course_accepted: false,
            accepted_section_ids: Vec::new(),
            rejection_reasons: vec![reason.to_string()],
            per_section_outcome: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
struct RejectionCounts {
    full: usize,
    conflict: usize,
    missing_time_data: usize,
}

impl RejectionCounts {
    fn reasons(&self) -> Vec<String> {
        [
            (self.full, "Full"),
            (self.conflict, "Conflict"),
            (self.missing_time_data, "Missing Time Data"),
        ]
        .into_iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, label)| format!("{} {}", count, label))
        .collect()
    }
}

/// Decides whether `course` has at least one open section that fits around
/// `blackout`.
///
/// Course-level gates run first and short-circuit. Each section is then
/// checked for a free seat before its meeting times; a full section is never
/// conflict-checked.
///
/// Enroll codes are expected to be unique within a course; a repeated code
/// is evaluated once, on its first section.
pub fn evaluate(
    course: &Course,
    criteria: &Criteria,
    blackout: &BlackoutSchedule,
) -> EligibilityResult {
    if let Some(reason) = criteria.gate(course) {
        debug!("{} rejected at course level: {}", course.id, reason);
        return EligibilityResult::gated(reason);
    }

    let mut accepted: Vec<String> = Vec::new();
    let mut outcomes = BTreeMap::new();
    let mut warnings = Vec::new();
    let mut counts = RejectionCounts::default();

    for section in &course.sections {
        if outcomes.contains_key(&section.id) {
            warn!("{} repeats section {}; keeping the first", course.id, section.id);
            continue;
        }

        let outcome = if section.is_full() {
            counts.full += 1;
            SectionOutcome::Full {
                enrolled: section.enrolled_count,
                capacity: section.capacity,
            }
        } else {
            match check_conflict(section, blackout) {
                ConflictOutcome::NoConflict => {
                    accepted.push(section.id.clone());
                    SectionOutcome::Eligible
                }
                ConflictOutcome::Conflict { day, meeting, .. } => {
                    counts.conflict += 1;
                    SectionOutcome::Conflict {
                        day,
                        detail: format!("Conflict on {} at {}", day, meeting),
                    }
                }
                ConflictOutcome::MissingTimeData { detail } => {
                    counts.missing_time_data += 1;
                    warnings.push(section.id.clone());
                    SectionOutcome::MissingTimeData { detail }
                }
            }
        };
        outcomes.insert(section.id.clone(), outcome);
    }

    let course_accepted = !accepted.is_empty();
    let rejection_reasons = if course_accepted {
        Vec::new()
    } else if course.sections.is_empty() {
        vec![NO_SECTIONS.to_string()]
    } else {
        counts.reasons()
    };

    debug!(
        "{} evaluated: {} of {} sections eligible",
        course.id,
        accepted.len(),
        course.sections.len()
    );

    EligibilityResult {
        course_accepted,
        accepted_section_ids: accepted,
        rejection_reasons,
        per_section_outcome: outcomes,
        warnings,
    }
}

/// Evaluates a batch of courses against one shared schedule, in input order.
pub fn evaluate_all<'a, I>(
    courses: I,
    criteria: &Criteria,
    blackout: &BlackoutSchedule,
) -> Vec<EligibilityResult>
where
    I: IntoIterator<Item = &'a Course>,
{
    courses
        .into_iter()
        .map(|course| evaluate(course, criteria, blackout))
        .collect()
}
