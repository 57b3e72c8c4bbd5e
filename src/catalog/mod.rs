//! Maps catalog JSON onto the course model and reads class folders.

pub mod dto;
pub mod loader;

use std::collections::BTreeSet;

use serde_json::Value;

use crate::error::ScheduleError;
use crate::models::{Course, Meeting, Section};

pub use loader::{load_blackout_file, load_committed_folder, load_folder};

pub const UNKNOWN_COURSE: &str = "Unknown";

/// A parsed course kept next to the document it came from, so exports can
/// reproduce the original record.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub raw: Value,
    pub course: Course,
}

impl CatalogEntry {
    pub fn from_value(raw: Value) -> Result<Self, ScheduleError> {
        let course = parse_course(&raw)?;
        Ok(Self { raw, course })
    }
}

pub fn parse_course(raw: &Value) -> Result<Course, ScheduleError> {
    let hint = record_hint(raw);
    let record: dto::ClassRecord = serde_json::from_value(raw.clone())
        .map_err(|e| ScheduleError::malformed_record(&hint, "(document)", e.to_string()))?;

    into_course(record)
}

pub fn into_course(record: dto::ClassRecord) -> Result<Course, ScheduleError> {
    let id = record
        .course_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| UNKNOWN_COURSE.to_string());

    let ge_tags: BTreeSet<String> = record
        .general_education
        .unwrap_or_default()
        .into_iter()
        .filter_map(|ge| ge.ge_code)
        .map(|code| code.trim().to_string())
        .filter(|code| !code.is_empty())
        .collect();

    let sections = record
        .class_sections
        .unwrap_or_default()
        .into_iter()
        .map(|s| into_section(&id, s))
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = BTreeSet::new();
    if let Some(dup) = sections.iter().find(|s| !seen.insert(s.id.as_str())) {
        return Err(ScheduleError::malformed_record(
            &id,
            "enrollCode",
            format!("{} appears on more than one section", dup.id),
        ));
    }

    Ok(Course {
        title: record.title.map(|t| t.trim().to_string()),
        subject: record.subject_area.unwrap_or_default().trim().to_string(),
        ge_tags,
        is_online: record.on_line_course.unwrap_or(false),
        sections,
        id,
    })
}

/// Meeting times of an already committed class. Capacity and enrollment
/// fields are ignored, so a bad count never hides busy time.
pub fn parse_committed_meetings(raw: &Value) -> Result<Vec<Meeting>, ScheduleError> {
    let hint = record_hint(raw);
    let record: dto::CommittedRecord = serde_json::from_value(raw.clone())
        .map_err(|e| ScheduleError::malformed_record(&hint, "(document)", e.to_string()))?;

    Ok(record
        .class_sections
        .unwrap_or_default()
        .into_iter()
        .flat_map(|s| s.time_locations.unwrap_or_default())
        .map(|loc| meeting_from(&loc))
        .collect())
}

fn record_hint(raw: &Value) -> String {
    raw.get("courseId")
        .and_then(Value::as_str)
        .map(|id| id.trim().to_string())
        .unwrap_or_else(|| UNKNOWN_COURSE.to_string())
}

fn meeting_from(loc: &dto::TimeLocation) -> Meeting {
    Meeting::parse(
        loc.days.as_deref(),
        loc.begin_time.as_deref(),
        loc.end_time.as_deref(),
    )
}

fn into_section(course_id: &str, section: dto::ClassSection) -> Result<Section, ScheduleError> {
    let id = section
        .enroll_code
        .map(|code| code.trim().to_string())
        .filter(|code| !code.is_empty())
        .ok_or_else(|| ScheduleError::malformed_record(course_id, "enrollCode", "is missing"))?;

    let capacity = count_field(course_id, &id, "maxEnroll", section.max_enroll.as_ref())?;
    let enrolled_count = count_field(
        course_id,
        &id,
        "enrolledTotal",
        section.enrolled_total.as_ref(),
    )?;

    let meetings = section
        .time_locations
        .unwrap_or_default()
        .iter()
        .map(meeting_from)
        .collect();

    Ok(Section {
        label: section.section.map(|s| s.trim().to_string()),
        capacity,
        enrolled_count,
        meetings,
        is_primary: section.secondary_status.is_none(),
        id,
    })
}

/// Absent or null counts default to zero. Anything present must be a
/// non-negative whole number.
fn count_field(
    course_id: &str,
    section_id: &str,
    field: &str,
    value: Option<&Value>,
) -> Result<u32, ScheduleError> {
    let malformed = |detail: String| {
        ScheduleError::malformed_record(format!("{}/{}", course_id, section_id), field, detail)
    };

    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => {
            let whole = n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64))
                .ok_or_else(|| malformed(format!("is not a non-negative integer: {}", n)))?;
            u32::try_from(whole).map_err(|_| malformed(format!("is out of range: {}", whole)))
        }
        Some(other) => Err(malformed(format!("is not numeric: {}", other))),
    }
}
