use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::llm_client::MODEL_ID;
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and model backend.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "planner-api",
        "model": MODEL_ID,
        "region": state.config.bedrock_region,
    }))
}
