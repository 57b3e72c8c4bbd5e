use serde::Serialize;
use tracing::info;

use crate::catalog::{self, CatalogEntry};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::report::MasterResults;
use crate::schedule::BlackoutSchedule;
use crate::services::eligibility::{self, Criteria, EligibilityResult};

/// One filtering pass over the configured class folders.
pub struct FilterService {
    config: AppConfig,
}

#[derive(Debug, Default, Serialize)]
pub struct FilterStats {
    pub committed_courses: usize,
    pub blackout_windows: usize,
    pub evaluated: usize,
    pub passed: usize,
    pub failed: usize,
}

#[derive(Debug)]
pub struct Evaluation {
    pub entry: CatalogEntry,
    pub result: EligibilityResult,
}

#[derive(Debug)]
pub struct FilterRun {
    pub evaluations: Vec<Evaluation>,
    pub stats: FilterStats,
}

impl FilterRun {
    pub fn master_results(&self) -> MasterResults {
        let mut results = MasterResults::new();
        for evaluation in &self.evaluations {
            results.record(&evaluation.entry, &evaluation.result);
        }
        results
    }
}

impl FilterService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn criteria(&self) -> &Criteria {
        &self.config.criteria
    }

    /// Committed classes plus any hand-entered busy windows.
    pub fn build_blackout(&self) -> Result<(BlackoutSchedule, usize), AppError> {
        let (mut schedule, committed) =
            catalog::load_committed_folder(&self.config.current_classes_dir)?;

        if let Some(path) = &self.config.blackout_file {
            let manual = catalog::load_blackout_file(path)?;
            info!(
                "Merging {} manual busy windows from {}",
                manual.len(),
                path.display()
            );
            schedule = schedule.merge(manual);
        }

        Ok((schedule, committed))
    }

    pub fn run(&self) -> Result<FilterRun, AppError> {
        info!(
            "Step 1: Building blackout schedule from {}",
            self.config.current_classes_dir.display()
        );
        let (blackout, committed_courses) = self.build_blackout()?;
        info!("Blackout schedule has {} windows", blackout.len());

        info!(
            "Step 2: Checking potential classes in {}",
            self.config.potential_classes_dir.display()
        );
        let candidates = catalog::load_folder(&self.config.potential_classes_dir)?;

        let mut stats = FilterStats {
            committed_courses,
            blackout_windows: blackout.len(),
            ..FilterStats::default()
        };

        let results = eligibility::evaluate_all(
            candidates.iter().map(|e| &e.course),
            &self.config.criteria,
            &blackout,
        );

        let evaluations: Vec<Evaluation> = candidates
            .into_iter()
            .zip(results)
            .map(|(entry, result)| Evaluation { entry, result })
            .collect();

        stats.evaluated = evaluations.len();
        stats.passed = evaluations
            .iter()
            .filter(|e| e.result.course_accepted)
            .count();
        stats.failed = stats.evaluated - stats.passed;

        info!("Filter pass completed: {:?}", stats);
        Ok(FilterRun { evaluations, stats })
    }
}
