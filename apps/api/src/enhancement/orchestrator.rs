//! Enhancement Orchestrator. Turns an `EnhancementRequest` into a result by
//! trying candidate models in order, with bounded retries per candidate.
//!
//! Flow: validate input → order candidates → build system prompt →
//!       for each candidate: attempt, classify, retry/advance/fail →
//!       on success: persist + analytics (best-effort) → return.
//!
//! At most one completion call is in flight per request. Dropping the future
//! returned by `enhance` cancels any pending backoff sleep or HTTP call, and
//! no sink write happens for an abandoned request.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Map, Value};
use tokio::time::{error::Elapsed, Instant};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::enhancement::candidates::order_candidates;
use crate::enhancement::errors::{AttemptFailure, EnhanceError};
use crate::enhancement::models::{EnhancementRequest, EnhancementResult, OperationKind};
use crate::enhancement::prompts::build_system_prompt;
use crate::enhancement::retry::{next_transition, RetryPolicy, RetryState, Transition};
use crate::enhancement::sinks::{AnalyticsSink, EnhancedPromptRecord, PromptStore};
use crate::errors::ConfigError;
use crate::llm_client::{CompletionClient, CompletionRequest};

/// Analytics event emitted once per successful enhancement.
pub const ENHANCED_EVENT: &str = "prompt_enhanced";

/// Upper bound on each best-effort sink write.
const SINK_TIMEOUT: Duration = Duration::from_secs(5);

/// The one place prompts get enhanced. Construct once at startup and share
/// via `Arc`; it holds no per-request state.
pub struct EnhancementOrchestrator {
    client: Arc<dyn CompletionClient>,
    store: Arc<dyn PromptStore>,
    analytics: Arc<dyn AnalyticsSink>,
    policy: RetryPolicy,
}

impl EnhancementOrchestrator {
    pub fn new(
        policy: RetryPolicy,
        client: Arc<dyn CompletionClient>,
        store: Arc<dyn PromptStore>,
        analytics: Arc<dyn AnalyticsSink>,
    ) -> Result<Self, ConfigError> {
        policy.validate()?;
        Ok(Self {
            client,
            store,
            analytics,
            policy,
        })
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Enhances (or expands / condenses) a prompt.
    ///
    /// Returns `InvalidInput` without any network call for blank input, and
    /// `EnhancementFailed` once every candidate has been exhausted or an auth
    /// failure makes further candidates pointless.
    pub async fn enhance(
        &self,
        request: &EnhancementRequest,
    ) -> Result<EnhancementResult, EnhanceError> {
        let raw_text = request.raw_text.trim();
        if raw_text.is_empty() {
            return Err(EnhanceError::InvalidInput(
                "prompt must not be empty".to_string(),
            ));
        }

        let started = Instant::now();
        let candidates = order_candidates(&request.target_model_hint, &self.policy.candidates);
        let system_prompt =
            build_system_prompt(request.operation, request.custom_instructions.as_deref());

        let mut state = RetryState::new();
        let mut last_failure: Option<AttemptFailure> = None;

        'candidates: while let Some(model) = candidates.get(state.candidate_index) {
            let completion_request = CompletionRequest {
                system_prompt: system_prompt.clone(),
                user_prompt: raw_text.to_string(),
                model: model.clone(),
                temperature: self.policy.temperature,
                max_tokens: self.policy.max_tokens,
            };

            loop {
                state.record_attempt();
                debug!(
                    "{} attempt {}/{} with model {}",
                    request.operation.as_str(),
                    state.attempt_index,
                    self.policy.max_attempts,
                    model
                );

                let outcome = match self.client.complete(&completion_request).await {
                    Ok(completion) => validate_output(&completion.text, raw_text, request.operation),
                    Err(err) => Err(AttemptFailure::from(err)),
                };

                let failure = match outcome {
                    Ok(text) => {
                        let result = EnhancementResult {
                            text,
                            model_used: model.clone(),
                            elapsed_ms: started.elapsed().as_millis() as u64,
                            attempts: state.total_attempts,
                        };
                        info!(
                            "{} succeeded with {} after {} attempts in {}ms",
                            request.operation.as_str(),
                            result.model_used,
                            result.attempts,
                            result.elapsed_ms
                        );
                        self.record_success(request, raw_text, &result).await;
                        return Ok(result);
                    }
                    Err(failure) => failure,
                };

                match next_transition(&state, &failure, &self.policy) {
                    Transition::RetryAfter(delay) => {
                        warn!(
                            "Model {} attempt {} failed ({failure}), retrying after {}ms",
                            model,
                            state.attempt_index,
                            delay.as_millis()
                        );
                        state.next_delay = Some(delay);
                        last_failure = Some(failure);
                    }
                    Transition::NextCandidate => {
                        warn!(
                            "Abandoning model {} after {} attempts: {failure}",
                            model, state.attempt_index
                        );
                        last_failure = Some(failure);
                        state.advance_candidate();
                        continue 'candidates;
                    }
                    Transition::Fail => {
                        warn!("Abandoning all remaining models: {failure}");
                        last_failure = Some(failure);
                        state.advance_candidate();
                        break 'candidates;
                    }
                }

                if let Some(delay) = state.next_delay.take() {
                    tokio::time::sleep(delay).await;
                }
            }
        }

        // Policy validation guarantees at least one candidate, hence one attempt.
        let last_error = last_failure.unwrap_or(AttemptFailure::EmptyResponse);
        let err = EnhanceError::EnhancementFailed {
            candidates_tried: state.candidate_index,
            attempts: state.total_attempts,
            last_error: Box::new(last_error),
        };
        error!("{} failed: {err}", request.operation.as_str());
        Err(err)
    }

    /// Persistence and analytics for a successful request. Failures are logged
    /// and never change the outcome.
    async fn record_success(
        &self,
        request: &EnhancementRequest,
        original: &str,
        result: &EnhancementResult,
    ) {
        let record = EnhancedPromptRecord {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            original_prompt: original.to_string(),
            enhanced_prompt: result.text.clone(),
            model_used: result.model_used.clone(),
            operation: request.operation,
        };
        let fields = analytics_fields(request.operation, original, result);

        let (stored, recorded) = tokio::join!(
            tokio::time::timeout(SINK_TIMEOUT, self.store.append(&record)),
            tokio::time::timeout(
                SINK_TIMEOUT,
                self.analytics.record(ENHANCED_EVENT, request.user_id, fields)
            ),
        );
        log_sink_outcome("persistence", stored);
        log_sink_outcome("analytics", recorded);
    }
}

/// Trims model output and rejects it when it is empty or, for operations that
/// must add detail, shorter than the input.
fn validate_output(
    text: &str,
    input: &str,
    operation: OperationKind,
) -> Result<String, AttemptFailure> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AttemptFailure::EmptyResponse);
    }

    let minimum = input.chars().count();
    let actual = text.chars().count();
    if operation.requires_growth() && actual < minimum {
        return Err(AttemptFailure::InvalidResponse { minimum, actual });
    }

    Ok(text.to_string())
}

fn analytics_fields(
    operation: OperationKind,
    original: &str,
    result: &EnhancementResult,
) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("operation".into(), json!(operation.as_str()));
    fields.insert("original_length".into(), json!(original.chars().count()));
    fields.insert("enhanced_length".into(), json!(result.text.chars().count()));
    fields.insert("model_used".into(), json!(result.model_used));
    fields.insert("elapsed_ms".into(), json!(result.elapsed_ms));
    fields.insert("attempts".into(), json!(result.attempts));
    fields
}

fn log_sink_outcome(sink: &str, outcome: Result<anyhow::Result<()>, Elapsed>) {
    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!("{sink} write failed (ignored): {e:#}"),
        Err(_) => warn!(
            "{sink} write timed out after {}s (ignored)",
            SINK_TIMEOUT.as_secs()
        ),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
