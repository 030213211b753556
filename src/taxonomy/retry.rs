//! Bounded retry with a fixed delay between attempts.

use std::{future::Future, time::Duration};

/// Outcome of a single attempt.
#[derive(Debug)]
pub enum Attempt<T> {
    /// Stop retrying and hand `T` back to the caller.
    Done(T),
    /// The attempt failed; the reason is only logged.
    Retry(String),
}

/// How many times an operation is tried and how long to wait in between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(2))
    }
}

impl RetryPolicy {
    /// Creates a policy. At least one attempt is always made.
    #[must_use]
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// A policy that never retries.
    #[must_use]
    pub fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Runs `op` until it returns [`Attempt::Done`] or the attempts run out.
    ///
    /// `op` receives the 1-based attempt number. The delay is applied between
    /// attempts only, never after the last one. Returns `None` when every
    /// attempt asked for a retry.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Option<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Attempt<T>>,
    {
        for attempt in 1..=self.max_attempts {
            match op(attempt).await {
                Attempt::Done(value) => return Some(value),
                Attempt::Retry(reason) => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        reason = %reason,
                        "attempt failed"
                    );
                    if attempt < self.max_attempts && !self.delay.is_zero() {
                        tokio::time::sleep(self.delay).await;
                    }
                }
            }
        }
        None
    }
}
