use classfit::catalog::CatalogEntry;
use classfit::models::{Meeting, Section, TimeWindow, Weekday};
use classfit::report::{self, MasterResults, ReportDetail};
use classfit::schedule::BlackoutSchedule;
use classfit::services::{Criteria, evaluate};
use serde_json::json;

fn entry(course_id: &str, sections: serde_json::Value) -> CatalogEntry {
    CatalogEntry::from_value(json!({
        "courseId": course_id,
        "subjectArea": "MATH",
        "classSections": sections
    }))
    .unwrap()
}

fn blackout() -> BlackoutSchedule {
    BlackoutSchedule::new().with_window(Weekday::Mon, TimeWindow::parse("08:00", "10:00").unwrap())
}

#[test]
fn test_passed_course_is_annotated() {
    let passing = entry(
        "MATH 4B",
        json!([{
            "enrollCode": "29496",
            "maxEnroll": 30,
            "enrolledTotal": 10,
            "timeLocations": [{ "days": "M W F", "beginTime": "11:00", "endTime": "11:50" }]
        }]),
    );
    let result = evaluate(&passing.course, &Criteria::new(), &blackout());

    let mut results = MasterResults::new();
    results.record(&passing, &result);

    assert_eq!(results.passed_ids(), ["MATH 4B".to_string()]);
    assert!(results.failed_ids().is_empty());

    let exported = serde_json::to_value(&results).unwrap();
    assert_eq!(exported["passed"]["raw"][0], passing.raw);
    let modified = &exported["passed"]["modified"][0];
    assert_eq!(modified["passingEnrollCodes"], json!(["29496"]));
    assert_eq!(modified["sectionTimesSummary"]["29496"], json!("MWF 11:00-11:50"));
    assert!(exported["passed"]["raw"][0].get("passingEnrollCodes").is_none());
    assert_eq!(exported["failed"]["raw"], json!([]));
}

#[test]
fn test_failed_course_carries_reasons() {
    let failing = entry(
        "MATH 8",
        json!([{
            "enrollCode": "1",
            "maxEnroll": 30,
            "enrolledTotal": 5,
            "timeLocations": [{ "days": "M", "beginTime": "09:00", "endTime": "09:50" }]
        }]),
    );
    let result = evaluate(&failing.course, &Criteria::new(), &blackout());

    let mut results = MasterResults::new();
    results.record(&failing, &result);

    let exported = serde_json::to_value(&results).unwrap();
    assert_eq!(exported["failed"]["modified"][0]["rejectionReasons"], json!(["1 Conflict"]));
    assert_eq!(results.failed_ids(), ["MATH 8".to_string()]);

    let lines = report::render_verdict(&failing, &result, ReportDetail::Summary);
    assert_eq!(lines, vec!["❌ MATH 8 REJECTED (1 Conflict)".to_string()]);
}

#[test]
fn test_render_verdict_for_accepted_course() {
    let passing = entry(
        "MATH 4B",
        json!([
            { "enrollCode": "1", "maxEnroll": 30, "enrolledTotal": 1,
              "timeLocations": [{ "days": "TR", "beginTime": "14:00", "endTime": "15:15" }] },
            { "enrollCode": "2", "maxEnroll": 30, "enrolledTotal": 1 }
        ]),
    );
    let result = evaluate(&passing.course, &Criteria::new(), &blackout());
    let lines = report::render_verdict(&passing, &result, ReportDetail::Summary);

    assert_eq!(lines[0], "✅ MATH 4B WORKS! (Valid sections: 1)");
    assert_eq!(lines[1], "   👉 Section 1: TR 14:00-15:15");
    assert!(lines[2].contains("missing data: 2"));
}

#[test]
fn test_section_times_summary_skips_malformed() {
    let section = Section::new("1", 10, 0)
        .with_meeting(Meeting::parse(Some("MW"), Some("09:00"), Some("09:50")))
        .with_meeting(Meeting::parse(Some("F"), None, None))
        .with_meeting(Meeting::parse(Some("F"), Some("13:00"), Some("14:00")));

    assert_eq!(report::section_times_summary(&section), "MW 09:00-09:50 | F 13:00-14:00");
}

#[test]
fn test_write_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("master_course_results.json");

    MasterResults::new().write_to(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let written: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        written,
        json!({ "passed": { "raw": [], "modified": [] }, "failed": { "raw": [], "modified": [] } })
    );
}

#[test]
fn test_detailed_verdict_for_accepted_course() {
    let passing = CatalogEntry::from_value(json!({
        "courseId": "PHYS 6A",
        "title": "INTRO PHYSICS",
        "subjectArea": "PHYS",
        "generalEducation": [{ "geCode": "C" }],
        "classSections": [
            { "enrollCode": "100", "section": "0100", "maxEnroll": 200, "enrolledTotal": 150,
              "secondaryStatus": null,
              "timeLocations": [{ "days": "TR", "beginTime": "11:00", "endTime": "12:15" }] },
            { "enrollCode": "101", "section": "0101", "maxEnroll": 25, "enrolledTotal": 25,
              "secondaryStatus": "R",
              "timeLocations": [{ "days": "W", "beginTime": "15:00", "endTime": "15:50" }] },
            { "enrollCode": "102", "section": "0102", "maxEnroll": 25, "enrolledTotal": 3,
              "secondaryStatus": "R",
              "timeLocations": [{ "days": "F", "beginTime": "10:00", "endTime": "10:50" }] }
        ]
    }))
    .unwrap();
    let result = evaluate(&passing.course, &Criteria::new(), &blackout());

    let lines = report::render_verdict(&passing, &result, ReportDetail::Full);

    assert!(lines.contains(&"✨ MATCH FOUND: PHYS 6A".to_string()));
    assert!(lines.contains(&"📘 Title: INTRO PHYSICS".to_string()));
    assert!(lines.contains(&"🎓 GE Areas: C".to_string()));
    assert!(lines.contains(&"📚 Main Lecture (Section 0100):".to_string()));
    assert!(lines.contains(&"   🕒 TR 11:00-12:15".to_string()));
    assert!(lines.contains(&"   ✅ Section 0102 (Code: 102)".to_string()));
    assert!(lines.contains(&"      🕒 F 10:00-10:50".to_string()));
    assert!(!lines.iter().any(|l| l.contains("Code: 101")));
}

#[test]
fn test_detailed_verdict_lists_each_rejected_section() {
    let failing = entry(
        "MATH 8",
        json!([
            { "enrollCode": "1", "maxEnroll": 30, "enrolledTotal": 30 },
            { "enrollCode": "2", "maxEnroll": 30, "enrolledTotal": 5,
              "timeLocations": [{ "days": "M", "beginTime": "09:00", "endTime": "09:50" }] },
            { "enrollCode": "3", "maxEnroll": 30, "enrolledTotal": 5 }
        ]),
    );
    let result = evaluate(&failing.course, &Criteria::new(), &blackout());

    let lines = report::render_verdict(&failing, &result, ReportDetail::Full);

    assert_eq!(
        lines,
        vec![
            "❌ MATH 8 Rejected: No valid sections found.".to_string(),
            "   - Section 1: Full (30/30)".to_string(),
            "   - Section 2: Conflict on M at 09:00-09:50".to_string(),
            "   - Section 3: No time data found (TBA?)".to_string(),
        ]
    );
}

#[test]
fn test_detailed_verdict_for_gated_course() {
    let gated = entry("MATH 8", json!([]));
    let result = evaluate(&gated.course, &Criteria::new().with_subject("PHYS"), &blackout());

    let lines = report::render_verdict(&gated, &result, ReportDetail::Full);
    assert_eq!(lines, vec!["❌ MATH 8 Rejected: wrong subject".to_string()]);
}
