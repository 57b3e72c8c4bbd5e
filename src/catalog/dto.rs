use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A class record as served by the UCSB curriculums API
/// (`/classes/{quarter}/{enrollCode}?includeClassSections=true`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subject_area: Option<String>,
    #[serde(default)]
    pub general_education: Option<Vec<GeneralEducation>>,
    #[serde(default)]
    pub on_line_course: Option<bool>,
    #[serde(default)]
    pub class_sections: Option<Vec<ClassSection>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralEducation {
    #[serde(default)]
    pub ge_code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSection {
    #[serde(default)]
    pub enroll_code: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
    /// Kept loose so a non-numeric value can be reported instead of failing
    /// the whole document.
    #[serde(default)]
    pub enrolled_total: Option<Value>,
    #[serde(default)]
    pub max_enroll: Option<Value>,
    #[serde(default)]
    pub secondary_status: Option<String>,
    #[serde(default)]
    pub time_locations: Option<Vec<TimeLocation>>,
}

/// The slice of a class record that matters for an already committed class:
/// only meeting times. Enrollment counts are not read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommittedRecord {
    #[serde(default)]
    pub class_sections: Option<Vec<CommittedSection>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommittedSection {
    #[serde(default)]
    pub time_locations: Option<Vec<TimeLocation>>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeLocation {
    #[serde(default)]
    pub days: Option<String>,
    #[serde(default)]
    pub begin_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}
