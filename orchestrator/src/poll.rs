// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Waiting on conditions that other processes make true.
//!
//! Offer delivery and on-chain activation both happen outside the orchestrator.
//! Both are observed by re-asking a node at a fixed interval until the answer
//! changes, a limit is hit, or the run is cancelled.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// `None` polls until the condition holds or the run is cancelled.
    pub max_attempts: Option<u32>,
    /// Wall-clock limit measured from the first attempt.
    pub deadline: Option<Duration>,
}

impl PollPolicy {
    pub fn unbounded(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
            deadline: None,
        }
    }

    pub fn bounded(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: Some(max_attempts),
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum PollOutcome<T> {
    Ready { value: T, attempts: u32 },
    /// Attempt or time limit reached without the condition holding.
    Exhausted { attempts: u32 },
    Cancelled { attempts: u32 },
}

/// Call `check` until it yields `Some`.
///
/// `check` receives the 1-based attempt number. A check error ends the wait
/// immediately and is returned as is. Cancellation is observed before every
/// attempt and during every sleep.
pub async fn poll_until<T, E, F, Fut>(
    policy: &PollPolicy,
    cancel: &CancellationToken,
    mut check: F,
) -> Result<PollOutcome<T>, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    let started = Instant::now();
    let mut attempts = 0u32;

    loop {
        if cancel.is_cancelled() {
            return Ok(PollOutcome::Cancelled { attempts });
        }

        attempts += 1;
        if let Some(value) = check(attempts).await? {
            return Ok(PollOutcome::Ready { value, attempts });
        }

        if policy.max_attempts.is_some_and(|max| attempts >= max) {
            return Ok(PollOutcome::Exhausted { attempts });
        }
        if policy.deadline.is_some_and(|d| started.elapsed() >= d) {
            return Ok(PollOutcome::Exhausted { attempts });
        }

        tracing::trace!(attempts, "condition not met, sleeping {:?}", policy.interval);
        if !sleep_or_cancel(policy.interval, cancel).await {
            return Ok(PollOutcome::Cancelled { attempts });
        }
    }
}

/// Sleep for `duration`. Returns `false` if cancelled first.
pub async fn sleep_or_cancel(duration: Duration, cancel: &CancellationToken) -> bool {
    tokio::select! {
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(duration) => true,
    }
}
