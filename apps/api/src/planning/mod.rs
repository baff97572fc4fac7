// Learning plan pipeline: validate → prompt → bounded model call → extract.
// All model calls go through llm_client.

pub mod extraction;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod validation;
