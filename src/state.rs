use std::sync::Arc;

use crate::schedule::BlackoutSchedule;
use crate::services::Criteria;

/// Built once at startup; the schedule is never mutated while serving.
#[derive(Clone)]
pub struct AppState {
    pub blackout: Arc<BlackoutSchedule>,
    pub criteria: Arc<Criteria>,
}

impl AppState {
    pub fn new(blackout: BlackoutSchedule, criteria: Criteria) -> Self {
        Self {
            blackout: Arc::new(blackout),
            criteria: Arc::new(criteria),
        }
    }
}
