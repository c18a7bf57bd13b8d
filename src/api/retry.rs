use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::error::{AnalyticsError, ErrorClass, Result};

/// Attempts per logical request observed across the dashboard hooks
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Delay before the first retry
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Which failures the retry loop will try again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryScope {
    /// Retry every failure uniformly.
    #[default]
    All,
    /// Stop on the first [`ErrorClass::Terminal`] failure.
    TransientOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub scope: RetryScope,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
            scope: RetryScope::All,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            scope: RetryScope::All,
        }
    }

    pub fn with_scope(mut self, scope: RetryScope) -> Self {
        self.scope = scope;
        self
    }

    /// Single attempt, no backoff.
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// A policy of zero attempts still makes one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Worst-case time spent sleeping before giving up
    pub fn total_backoff(&self) -> Duration {
        (0..self.attempts() - 1)
            .map(|i| calculate_backoff(self, i))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

/// Calculate exponential backoff duration for a zero-based retry index
///
/// Returns: Duration = base_delay * 2^attempt_index
/// - Index 0: 1 second (default policy)
/// - Index 1: 2 seconds
/// - Index 2: 4 seconds
pub fn calculate_backoff(policy: &RetryPolicy, attempt_index: u32) -> Duration {
    policy
        .base_delay
        .saturating_mul(2_u32.saturating_pow(attempt_index))
}

/// Check if another attempt should follow the given one-based attempt
pub fn should_retry(policy: &RetryPolicy, attempt_number: u32, error: &AnalyticsError) -> bool {
    if error.is_cancelled() || attempt_number >= policy.attempts() {
        return false;
    }
    match policy.scope {
        RetryScope::All => true,
        RetryScope::TransientOnly => error.class() == ErrorClass::Retryable,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success,
    Failure,
}

/// One attempt of a logical request, reported to observers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchAttempt {
    /// One-based
    pub attempt_number: u32,
    /// Backoff slept after this attempt, if another one follows
    pub next_delay: Option<Duration>,
    pub outcome: AttemptOutcome,
}

/// Run `op` until it succeeds or the policy is exhausted.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    op: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    retry_with_backoff_observed(policy, cancel, op, |_| {}).await
}

/// [`retry_with_backoff`] with a callback invoked once per attempt.
///
/// Failures after the last attempt are wrapped in
/// [`AnalyticsError::ExhaustedRetries`]. A terminal failure under
/// [`RetryScope::TransientOnly`] and cancellation are returned as-is.
pub async fn retry_with_backoff_observed<T, F, Fut, O>(
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    mut op: F,
    mut on_attempt: O,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    O: FnMut(&FetchAttempt),
{
    let max_attempts = policy.attempts();
    let mut attempt_number = 1;

    loop {
        if cancel.is_cancelled() {
            return Err(AnalyticsError::Cancelled);
        }

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(AnalyticsError::Cancelled),
            result = op() => result,
        };

        let error = match result {
            Ok(value) => {
                log::debug!("Attempt {}/{} succeeded", attempt_number, max_attempts);
                on_attempt(&FetchAttempt {
                    attempt_number,
                    next_delay: None,
                    outcome: AttemptOutcome::Success,
                });
                return Ok(value);
            }
            Err(e) => e,
        };

        if !should_retry(policy, attempt_number, &error) {
            on_attempt(&FetchAttempt {
                attempt_number,
                next_delay: None,
                outcome: AttemptOutcome::Failure,
            });
            if error.is_cancelled() {
                return Err(error);
            }
            if attempt_number < max_attempts {
                log::warn!("Attempt {} failed with terminal error: {}", attempt_number, error);
                return Err(error);
            }
            log::warn!("Giving up after {} attempt(s): {}", attempt_number, error);
            return Err(AnalyticsError::ExhaustedRetries {
                attempts: attempt_number,
                source: Box::new(error),
            });
        }

        let delay = calculate_backoff(policy, attempt_number - 1);
        on_attempt(&FetchAttempt {
            attempt_number,
            next_delay: Some(delay),
            outcome: AttemptOutcome::Failure,
        });
        log::warn!(
            "Attempt {}/{} failed: {}; retrying in {}ms",
            attempt_number,
            max_attempts,
            error,
            delay.as_millis()
        );

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(AnalyticsError::Cancelled),
            _ = tokio::time::sleep(delay) => {}
        }

        attempt_number += 1;
    }
}
