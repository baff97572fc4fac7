//! Plan generation — orchestrates prompt → bounded model call → extraction.
//!
//! Flow: build_plan_prompt → race(model.complete, timeout) → extract_plan.
//!
//! Timeouts and unparseable output both degrade to `LearningPlan::fallback`,
//! which is still a success for the caller. Only backend faults become errors.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::llm_client::{GenerationParams, LlmError, ModelInvocation, TextModel};
use crate::models::plan::{LearningPlan, PlanRequest};
use crate::planning::extraction::{extract_plan, ExtractedPlan};
use crate::planning::prompts::build_plan_prompt;

/// How long to wait for the model. Kept under the gateway's ~29 s integration limit.
pub const MODEL_TIMEOUT: Duration = Duration::from_secs(25);

const MAX_LOG_CHARS: usize = 2000;

/// Why the fallback plan was served instead of model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    Timeout,
    EmptyOutput,
    Unparseable,
}

/// Result of one generation. Both variants are HTTP 200.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    Parsed(ExtractedPlan),
    Fallback {
        plan: LearningPlan,
        reason: FallbackReason,
    },
}

impl PlanOutcome {
    fn fallback(request: &PlanRequest, reason: FallbackReason) -> Self {
        warn!(?reason, "Serving fallback plan for topic {:?}", request.topic);
        PlanOutcome::Fallback {
            plan: LearningPlan::fallback(request),
            reason,
        }
    }
}

impl IntoResponse for PlanOutcome {
    fn into_response(self) -> Response {
        match self {
            PlanOutcome::Parsed(extracted) => Json(extracted.value).into_response(),
            PlanOutcome::Fallback { plan, .. } => Json(plan).into_response(),
        }
    }
}

/// Generates plans against an injected model backend.
/// Built once at startup and shared by every request.
pub struct PlanGenerator {
    model: Arc<dyn TextModel>,
    timeout: Duration,
    params: GenerationParams,
}

impl PlanGenerator {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self {
            model,
            timeout: MODEL_TIMEOUT,
            params: GenerationParams::default(),
        }
    }

    /// Produces a plan for a validated request.
    ///
    /// Steps:
    /// 1. build_plan_prompt() → prompt
    /// 2. model.complete() raced against the timeout; the loser is dropped
    /// 3. extract_plan() → model plan, or the fallback plan
    pub async fn generate(&self, request: &PlanRequest) -> Result<PlanOutcome, AppError> {
        let prompt = build_plan_prompt(request);
        debug!(prompt = %truncate_for_log(&prompt), "plan prompt");

        let invocation = ModelInvocation::json(&prompt, self.params);

        let output =
            match tokio::time::timeout(self.timeout, self.model.complete(&invocation)).await {
                Err(_) => {
                    warn!(
                        "Model did not respond within {}ms",
                        self.timeout.as_millis()
                    );
                    return Ok(PlanOutcome::fallback(request, FallbackReason::Timeout));
                }
                Ok(Err(LlmError::EmptyContent)) => {
                    return Ok(PlanOutcome::fallback(request, FallbackReason::EmptyOutput));
                }
                Ok(Err(e)) => return Err(AppError::Llm(e)),
                Ok(Ok(text)) => text,
            };

        debug!(llm_output = %truncate_for_log(&output), "raw model output");

        match extract_plan(&output) {
            Some(extracted) => {
                info!(tier = ?extracted.tier, "Extracted plan from model output");
                Ok(PlanOutcome::Parsed(extracted))
            }
            None => Ok(PlanOutcome::fallback(request, FallbackReason::Unparseable)),
        }
    }
}

fn truncate_for_log(text: &str) -> String {
    match text.char_indices().nth(MAX_LOG_CHARS) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
