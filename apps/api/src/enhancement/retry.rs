//! Retry policy and the pure transition function of the enhancement state machine.
//!
//! ```text
//! Idle → Selecting(i) → Attempting(j) ─┬─ Success                → Terminal(Success)
//!                                      ├─ Retryable, j+1 < max   → backoff → Attempting(j+1)
//!                                      ├─ Retryable, exhausted   → Selecting(i+1)
//!                                      ├─ NonRetryable           → Selecting(i+1)
//!                                      └─ Fatal                  → Terminal(Failure)
//! Selecting(n) with no candidates left                           → Terminal(Failure)
//! ```

use std::time::Duration;

use rand::Rng;

use crate::enhancement::errors::{AttemptFailure, EnhanceErrorKind};
use crate::errors::ConfigError;

/// Everything the orchestrator needs to know about how hard to try.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Default candidate order. A matching model hint is moved to the front.
    pub candidates: Vec<String>,
    /// Attempts per candidate, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles for every further retry.
    pub base_delay: Duration,
    /// Upper bound of the uniform jitter added to each delay.
    pub max_jitter: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl RetryPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.candidates.is_empty() {
            return Err(ConfigError::NoCandidates);
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        // Keeps successive delays strictly increasing even with maximal jitter.
        // A zero base delay is only allowed together with zero jitter.
        if !self.max_jitter.is_zero() && self.max_jitter >= self.base_delay {
            return Err(ConfigError::JitterTooLarge {
                jitter_ms: self.max_jitter.as_millis(),
                base_ms: self.base_delay.as_millis(),
            });
        }
        Ok(())
    }

    /// Deterministic part of the delay before retry number `retry` (0-indexed).
    pub fn base_backoff(&self, retry: u32) -> Duration {
        // Shift capped so a misconfigured attempt count cannot overflow.
        self.base_delay.saturating_mul(1u32 << retry.min(16))
    }

    /// Full delay before retry number `retry`: exponential base plus jitter.
    pub fn backoff(&self, retry: u32) -> Duration {
        let jitter_ms = self.max_jitter.as_millis() as u64;
        let jitter = if jitter_ms == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(rand::thread_rng().gen_range(0..=jitter_ms))
        };
        self.base_backoff(retry) + jitter
    }
}

/// Where the orchestrator is within one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetryState {
    pub candidate_index: usize,
    /// Attempts made against the current candidate.
    pub attempt_index: u32,
    pub next_delay: Option<Duration>,
    /// Attempts made across all candidates.
    pub total_attempts: u32,
}

impl RetryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_attempt(&mut self) {
        self.attempt_index += 1;
        self.total_attempts += 1;
        self.next_delay = None;
    }

    pub fn advance_candidate(&mut self) {
        self.candidate_index += 1;
        self.attempt_index = 0;
        self.next_delay = None;
    }
}

/// How a failed attempt is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Same candidate may be tried again after a backoff.
    Retryable,
    /// Give up on this candidate, move to the next.
    AbandonCandidate,
    /// Give up on every remaining candidate.
    Fatal,
}

pub fn classify(failure: &AttemptFailure) -> FailureClass {
    match failure.kind() {
        EnhanceErrorKind::RateLimitError => FailureClass::Retryable,
        // Credentials are shared by every candidate, so the next one fails too.
        EnhanceErrorKind::AuthError => FailureClass::Fatal,
        _ => FailureClass::AbandonCandidate,
    }
}

/// What to do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    RetryAfter(Duration),
    NextCandidate,
    Fail,
}

/// Decides the next step after a failed attempt. `state` must already count
/// the attempt that just failed.
pub fn next_transition(
    state: &RetryState,
    failure: &AttemptFailure,
    policy: &RetryPolicy,
) -> Transition {
    match classify(failure) {
        FailureClass::Fatal => Transition::Fail,
        FailureClass::AbandonCandidate => Transition::NextCandidate,
        FailureClass::Retryable if state.attempt_index < policy.max_attempts => {
            Transition::RetryAfter(policy.backoff(state.attempt_index - 1))
        }
        FailureClass::Retryable => Transition::NextCandidate,
    }
}
