// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1000;

#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Log a progress line whenever a verified index is a multiple of this.
    pub progress_interval: u64,
    pub retry: RetryPolicy,
    pub gap_policy: GapPolicy,
    /// Where to serve `/health`, `/status` and `/metrics`, if anywhere.
    pub status_addr: Option<SocketAddr>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            retry: RetryPolicy::default(),
            gap_policy: GapPolicy::default(),
            status_addr: None,
        }
    }
}

/// How transient store failures are retried. Malformed documents are never
/// retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self::default()
    }

    /// Delay before retry number `attempt` (starting at 1), doubling each
    /// time and capped at `max_backoff`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
        self.initial_backoff
            .checked_mul(factor)
            .unwrap_or(self.max_backoff)
            .min(self.max_backoff)
    }
}

/// What a missing record means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GapPolicy {
    /// Every missing record is the end of the chain.
    #[default]
    Frontier,
    /// A missing record followed by a later stored one halts the scan.
    Detect,
}
