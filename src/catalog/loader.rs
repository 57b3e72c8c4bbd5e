use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};

use crate::catalog::{self, CatalogEntry};
use crate::error::AppError;
use crate::schedule::BlackoutSchedule;

/// Reads every `*.json` class file in `folder`, sorted by file name.
///
/// A file that cannot be parsed is logged and skipped so one bad download
/// does not abort the batch. A missing folder is an error.
pub fn load_folder(folder: &Path) -> Result<Vec<CatalogEntry>, AppError> {
    let paths = json_files(folder)?;

    let mut entries = Vec::with_capacity(paths.len());
    for path in &paths {
        match load_file(path) {
            Ok(entry) => entries.push(entry),
            Err(e) => warn!("skipping {}: {}", path.display(), e),
        }
    }

    info!(
        "Loaded {} of {} class files from {}",
        entries.len(),
        paths.len(),
        folder.display()
    );
    Ok(entries)
}

/// Builds the busy schedule from every committed class file in `folder`.
///
/// Only meeting times are read. Unlike [`load_folder`], a file that cannot
/// be read is a hard error: skipping it would silently free up busy time.
/// Returns the schedule and the number of files it came from.
pub fn load_committed_folder(folder: &Path) -> Result<(BlackoutSchedule, usize), AppError> {
    let paths = json_files(folder)?;

    let mut meetings = Vec::new();
    for path in &paths {
        let text = fs::read_to_string(path).map_err(|e| AppError::read(path, e))?;
        let parsed = serde_json::from_str::<Value>(&text)
            .map_err(|e| e.to_string())
            .and_then(|raw| catalog::parse_committed_meetings(&raw).map_err(|e| e.to_string()))
            .map_err(|detail| AppError::CommittedFile {
                path: path.clone(),
                detail,
            })?;
        meetings.extend(parsed);
    }

    let schedule = BlackoutSchedule::from_meetings(&meetings);
    info!(
        "Built blackout of {} windows from {} committed class files in {}",
        schedule.len(),
        paths.len(),
        folder.display()
    );
    Ok((schedule, paths.len()))
}

fn json_files(folder: &Path) -> Result<Vec<PathBuf>, AppError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(folder)
        .map_err(|e| AppError::read(folder, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    Ok(paths)
}

pub fn load_file(path: &Path) -> Result<CatalogEntry, AppError> {
    let text = fs::read_to_string(path).map_err(|e| AppError::read(path, e))?;
    let raw: Value = serde_json::from_str(&text)?;
    Ok(CatalogEntry::from_value(raw)?)
}

/// Reads hand-entered busy windows, e.g.
/// `{"M": [["08:00", "09:00"]], "T": [["12:00", "14:00"]]}`.
pub fn load_blackout_file(path: &Path) -> Result<BlackoutSchedule, AppError> {
    let text = fs::read_to_string(path).map_err(|e| AppError::read(path, e))?;
    let busy: BTreeMap<String, Vec<(String, String)>> = serde_json::from_str(&text)?;
    Ok(BlackoutSchedule::from_busy_windows(&busy)?)
}
