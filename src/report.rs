//! Console summaries and the `master_course_results.json` export.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::catalog::CatalogEntry;
use crate::error::AppError;
use crate::models::{Meeting, Section};
use crate::services::{EligibilityResult, SectionOutcome};

const FILTER_MISMATCH: &str = "Filter Mismatch";

#[derive(Debug, Default, Serialize)]
pub struct Bucket {
    pub raw: Vec<Value>,
    pub modified: Vec<Value>,
}

#[derive(Debug, Default, Serialize)]
pub struct MasterResults {
    pub passed: Bucket,
    pub failed: Bucket,
    #[serde(skip)]
    passed_ids: Vec<String>,
    #[serde(skip)]
    failed_ids: Vec<String>,
}

impl MasterResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files the course under passed or failed, keeping the original record
    /// and an annotated copy.
    pub fn record(&mut self, entry: &CatalogEntry, result: &EligibilityResult) {
        let mut modified = entry.raw.clone();
        if result.course_accepted {
            if let Value::Object(map) = &mut modified {
                map.insert(
                    "passingEnrollCodes".to_string(),
                    serde_json::json!(result.accepted_section_ids),
                );
                map.insert(
                    "sectionTimesSummary".to_string(),
                    serde_json::json!(accepted_times(entry, result)),
                );
            }
            self.passed.raw.push(entry.raw.clone());
            self.passed.modified.push(modified);
            self.passed_ids.push(entry.course.id.clone());
        } else {
            if let Value::Object(map) = &mut modified {
                map.insert(
                    "rejectionReasons".to_string(),
                    serde_json::json!(result.rejection_reasons),
                );
            }
            self.failed.raw.push(entry.raw.clone());
            self.failed.modified.push(modified);
            self.failed_ids.push(entry.course.id.clone());
        }
    }

    pub fn passed_ids(&self) -> &[String] {
        &self.passed_ids
    }

    pub fn failed_ids(&self) -> &[String] {
        &self.failed_ids
    }

    pub fn write_to(&self, path: &Path) -> Result<(), AppError> {
        let body = serde_json::to_string_pretty(self)?;
        fs::write(path, body)?;
        info!("Master data exported to {}", path.display());
        Ok(())
    }
}

/// `"MWF 09:00-09:50 | R 14:00-14:50"`; malformed meetings are left out.
pub fn section_times_summary(section: &Section) -> String {
    section
        .meetings
        .iter()
        .filter_map(|m| m.as_scheduled())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}

fn accepted_times(entry: &CatalogEntry, result: &EligibilityResult) -> BTreeMap<String, String> {
    result
        .accepted_section_ids
        .iter()
        .filter_map(|id| entry.course.section(id))
        .map(|section| (section.id.clone(), section_times_summary(section)))
        .collect()
}

/// How much of each verdict goes to the console.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportDetail {
    /// One line per course plus the accepted section times.
    #[default]
    Summary,
    /// Title, GE areas, main lecture and every section's outcome.
    Full,
}

/// Console lines for one evaluated course.
pub fn render_verdict(
    entry: &CatalogEntry,
    result: &EligibilityResult,
    detail: ReportDetail,
) -> Vec<String> {
    match detail {
        ReportDetail::Summary => render_short(entry, result),
        ReportDetail::Full => render_full(entry, result),
    }
}

fn render_short(entry: &CatalogEntry, result: &EligibilityResult) -> Vec<String> {
    let course_id = &entry.course.id;
    if result.course_accepted {
        let mut lines = vec![format!(
            "✅ {} WORKS! (Valid sections: {})",
            course_id,
            result.accepted_section_ids.join(", ")
        )];
        for (code, times) in accepted_times(entry, result) {
            lines.push(format!("   👉 Section {}: {}", code, times));
        }
        if !result.warnings.is_empty() {
            lines.push(format!(
                "   ⚠️ Sections skipped due to missing data: {}",
                result.warnings.join(", ")
            ));
        }
        lines
    } else {
        vec![format!("❌ {} REJECTED ({})", course_id, reason_text(result))]
    }
}

fn render_full(entry: &CatalogEntry, result: &EligibilityResult) -> Vec<String> {
    let course = &entry.course;

    if !result.course_accepted {
        if result.per_section_outcome.is_empty() {
            return vec![format!("❌ {} Rejected: {}", course.id, reason_text(result))];
        }

        let mut lines = vec![format!("❌ {} Rejected: No valid sections found.", course.id)];
        for section in &course.sections {
            if let Some(outcome) = result.per_section_outcome.get(&section.id) {
                lines.push(format!("   - Section {}: {}", section.id, describe_outcome(outcome)));
            }
        }
        return lines;
    }

    let rule = "=".repeat(50);
    let ge_areas = if course.ge_tags.is_empty() {
        "None".to_string()
    } else {
        course.ge_tags.iter().cloned().collect::<Vec<_>>().join(", ")
    };

    let mut lines = vec![
        String::new(),
        rule.clone(),
        format!("✨ MATCH FOUND: {}", course.id),
        format!("📘 Title: {}", course.title.as_deref().unwrap_or("Untitled")),
        format!("🎓 GE Areas: {}", ge_areas),
    ];

    if let Some(lecture) = course.primary_section() {
        lines.push(String::new());
        lines.push(format!("📚 Main Lecture (Section {}):", section_name(lecture)));
        lines.extend(lecture.meetings.iter().map(|m| format!("   🕒 {}", meeting_line(m))));
    }

    lines.push(String::new());
    lines.push("📍 Valid Sections to Join:".to_string());
    for section in result
        .accepted_section_ids
        .iter()
        .filter_map(|id| course.section(id))
    {
        lines.push(format!(
            "   ✅ Section {} (Code: {})",
            section_name(section),
            section.id
        ));
        lines.extend(section.meetings.iter().map(|m| format!("      🕒 {}", meeting_line(m))));
    }

    if !result.warnings.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "⚠️ WARNING: Sections skipped due to missing data: {}",
            result.warnings.join(", ")
        ));
    }
    lines.push(rule);
    lines
}

fn reason_text(result: &EligibilityResult) -> String {
    if result.rejection_reasons.is_empty() {
        FILTER_MISMATCH.to_string()
    } else {
        result.rejection_reasons.join(", ")
    }
}

fn section_name(section: &Section) -> &str {
    section.label.as_deref().unwrap_or(&section.id)
}

fn meeting_line(meeting: &Meeting) -> String {
    match meeting {
        Meeting::Scheduled(m) => m.to_string(),
        Meeting::Malformed { detail, .. } => format!("(unreadable: {})", detail),
    }
}

fn describe_outcome(outcome: &SectionOutcome) -> String {
    match outcome {
        SectionOutcome::Full { enrolled, capacity } => {
            format!("Full ({}/{})", enrolled, capacity)
        }
        SectionOutcome::Conflict { detail, .. } => detail.clone(),
        SectionOutcome::MissingTimeData { detail } => detail.clone(),
        SectionOutcome::Eligible => "Eligible".to_string(),
    }
}

pub fn render_summary(results: &MasterResults) -> Vec<String> {
    let rule = "=".repeat(50);
    vec![
        rule.clone(),
        "RESULTS SUMMARY:".to_string(),
        format!("Passed: {:?}", results.passed_ids()),
        format!("Failed: {:?}", results.failed_ids()),
        rule,
    ]
}
