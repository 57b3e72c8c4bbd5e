pub mod eligibility;
pub mod filter_service;

pub use eligibility::{Criteria, EligibilityResult, SectionOutcome, evaluate, evaluate_all};
pub use filter_service::{Evaluation, FilterRun, FilterService, FilterStats};
