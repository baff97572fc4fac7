//! Axum route handlers for the Learning Plan API.

use axum::{extract::State, http::StatusCode};
use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::plan::Difficulty;
use crate::planning::generator::PlanOutcome;
use crate::planning::validation::parse_plan_request;
use crate::state::AppState;

/// POST /learning-plan (GET is routed here too)
///
/// Validates the body, then generates a plan. Model timeouts and
/// unparseable output still answer 200 with the fallback plan.
#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn handle_learning_plan(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<PlanOutcome, AppError> {
    let request = parse_plan_request(&body)?;

    if request.difficulty.parse::<Difficulty>().is_err() {
        warn!("Unrecognized difficulty label {:?}", request.difficulty);
    }

    info!(
        "Generating plan: topic={:?}, difficulty={:?}, timeframe={:?}",
        request.topic, request.difficulty, request.timeframe
    );

    state.generator.generate(&request).await
}

/// OPTIONS /learning-plan
///
/// CORS preflight. Always 200 with an empty body; the static CORS headers
/// are added by the router.
pub async fn handle_preflight() -> StatusCode {
    StatusCode::OK
}
