// Prompt enhancement pipeline.
// Implements: candidate ordering, system prompts, retry/fallback orchestration,
// best-effort persistence and analytics, enhancement history.
// All model calls go through llm_client; no direct HTTP calls here.

pub mod candidates;
pub mod errors;
pub mod handlers;
pub mod history;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod retry;
pub mod sinks;
