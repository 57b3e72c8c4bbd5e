use std::fs;
use std::net::SocketAddr;

use classfit::config::AppConfig;
use classfit::error::AppError;
use classfit::report::ReportDetail;
use classfit::services::{Criteria, FilterService};
use serde_json::json;

fn class(course_id: &str, code: &str, days: &str, begin: &str, end: &str) -> String {
    json!({
        "courseId": course_id,
        "subjectArea": "MATH",
        "classSections": [{
            "enrollCode": code,
            "maxEnroll": 40,
            "enrolledTotal": 10,
            "timeLocations": [{ "days": days, "beginTime": begin, "endTime": end }]
        }]
    })
    .to_string()
}

#[test]
fn test_run_over_class_folders() {
    let dir = tempfile::tempdir().unwrap();
    let current = dir.path().join("current_classes");
    let potential = dir.path().join("potential_classes");
    fs::create_dir(&current).unwrap();
    fs::create_dir(&potential).unwrap();

    let committed = class("MATH 3A", "1", "MWF", "09:00", "09:50");
    fs::write(current.join("class_1.json"), committed).unwrap();
    let clashing = class("MATH 4A", "2", "M", "09:30", "10:20");
    fs::write(potential.join("class_2.json"), clashing).unwrap();
    let fitting = class("MATH 4B", "3", "TR", "09:30", "10:45");
    fs::write(potential.join("class_3.json"), fitting).unwrap();

    let busy = dir.path().join("busy.json");
    fs::write(&busy, r#"{"F": [["15:00", "17:00"]]}"#).unwrap();

    let config = AppConfig {
        current_classes_dir: current,
        potential_classes_dir: potential,
        results_path: dir.path().join("results.json"),
        blackout_file: Some(busy),
        criteria: Criteria::new(),
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        report_detail: ReportDetail::Summary,
    };

    let run = FilterService::new(config).run().unwrap();

    assert_eq!(run.stats.committed_courses, 1);
    assert_eq!(run.stats.blackout_windows, 4);
    assert_eq!(run.stats.evaluated, 2);
    assert_eq!(run.stats.passed, 1);
    assert_eq!(run.stats.failed, 1);

    let results = run.master_results();
    assert_eq!(results.passed_ids(), ["MATH 4B".to_string()]);
    assert_eq!(results.failed_ids(), ["MATH 4A".to_string()]);
}

fn config_for(dir: &std::path::Path) -> AppConfig {
    AppConfig {
        current_classes_dir: dir.join("current_classes"),
        potential_classes_dir: dir.join("potential_classes"),
        results_path: dir.join("results.json"),
        blackout_file: None,
        criteria: Criteria::new(),
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        report_detail: ReportDetail::Summary,
    }
}

#[test]
fn test_committed_class_with_bad_counts_still_blocks_time() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    fs::create_dir(&config.current_classes_dir).unwrap();
    fs::create_dir(&config.potential_classes_dir).unwrap();

    let committed = json!({
        "courseId": "CHEM 1A",
        "classSections": [{
            "enrollCode": "9",
            "maxEnroll": "TBD",
            "timeLocations": [{ "days": "M", "beginTime": "09:00", "endTime": "10:00" }]
        }]
    });
    fs::write(config.current_classes_dir.join("class_9.json"), committed.to_string()).unwrap();
    fs::write(
        config.potential_classes_dir.join("class_2.json"),
        class("MATH 4A", "2", "M", "09:00", "09:50"),
    )
    .unwrap();

    let run = FilterService::new(config).run().unwrap();

    assert_eq!(run.stats.committed_courses, 1);
    assert_eq!(run.stats.blackout_windows, 1);
    assert_eq!(run.stats.passed, 0);
    assert_eq!(run.evaluations[0].result.rejection_reasons, vec!["1 Conflict".to_string()]);
}

#[test]
fn test_unreadable_committed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    fs::create_dir(&config.current_classes_dir).unwrap();
    fs::create_dir(&config.potential_classes_dir).unwrap();
    fs::write(config.current_classes_dir.join("class_1.json"), "{ truncated").unwrap();

    let result = FilterService::new(config).build_blackout();
    assert!(matches!(result, Err(AppError::CommittedFile { .. })));
}
