use axum::Json;
use axum::routing::post;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::catalog;
use crate::error::AppError;
use crate::schedule::BlackoutSchedule;
use crate::services::{self, Criteria, EligibilityResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    /// Overrides the server's default criteria when present.
    #[serde(default)]
    pub criteria: Option<Criteria>,
    pub courses: Vec<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseVerdict {
    pub course_id: String,
    pub result: EligibilityResult,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub results: Vec<CourseVerdict>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/blackout", get(blackout))
        .route("/evaluate", post(evaluate))
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn blackout(State(state): State<AppState>) -> Json<BlackoutSchedule> {
    Json(state.blackout.as_ref().clone())
}

async fn evaluate(
    State(state): State<AppState>,
    Json(req): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    if req.courses.is_empty() {
        return Err(AppError::BadRequest("courses must not be empty".to_string()));
    }

    let criteria = req.criteria.unwrap_or_else(|| state.criteria.as_ref().clone());

    let courses = req
        .courses
        .iter()
        .map(catalog::parse_course)
        .collect::<Result<Vec<_>, _>>()?;

    let results = courses
        .into_iter()
        .map(|course| {
            let result = services::evaluate(&course, &criteria, &state.blackout);
            CourseVerdict {
                course_id: course.id,
                result,
            }
        })
        .collect::<Vec<_>>();

    info!("Evaluated {} courses", results.len());
    Ok(Json(EvaluateResponse { results }))
}
