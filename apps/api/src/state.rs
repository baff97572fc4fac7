use std::sync::Arc;

use crate::config::Config;
use crate::planning::generator::PlanGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Holds the process-wide model client; built once at startup.
    pub generator: Arc<PlanGenerator>,
    pub config: Config,
}
