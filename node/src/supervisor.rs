// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! The scan loop.
//!
//! One tick fetches the record the cursor expects next, checks its linkage
//! and transaction hash, and advances the cursor. Ticks run in a plain loop
//! with a yield between them until the chain runs out or a check fails.

use crate::config::{GapPolicy, VerifierConfig};
use crate::errors::VerifyError;
use crate::fetcher::{FetchOutcome, RecordFetcher};
use crate::progress::{ScanState, ScanStatus};
use crate::telemetry;
use ledgercheck_kernel::{verify_record, Cursor, Digest, Linkage, RunDigest, ScanProof, JsonShaMapHasher, TxHasher};
use ledgercheck_store::DocumentStore;
use serde_json::json;
use tokio::sync::watch;

/// Outcome of one scan.
#[derive(Debug)]
pub struct ScanReport {
    pub state: ScanState,
    pub error: Option<VerifyError>,
    pub cursor: Cursor,
    /// Linkage of the first record, `None` if no record was verified.
    pub first_linkage: Option<Linkage>,
    pub proof: ScanProof,
}

impl ScanReport {
    pub fn is_success(&self) -> bool {
        self.state == ScanState::HaltedExhausted
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "state": self.state,
            "error": self.error.as_ref().map(|e| e.to_string()),
            "first_linkage": self.first_linkage,
            "proof": self.proof,
        })
    }
}

enum Tick {
    Advanced,
    Exhausted,
}

pub struct Supervisor<S, H = JsonShaMapHasher> {
    fetcher: RecordFetcher<S>,
    hasher: H,
    config: VerifierConfig,
    progress: Option<watch::Sender<ScanStatus>>,
}

impl<S: DocumentStore> Supervisor<S> {
    pub fn new(store: S, config: VerifierConfig) -> Self {
        Self {
            fetcher: RecordFetcher::new(store, config.retry),
            hasher: JsonShaMapHasher,
            config,
            progress: None,
        }
    }
}

impl<S: DocumentStore, H: TxHasher> Supervisor<S, H> {
    pub fn with_hasher<H2: TxHasher>(self, hasher: H2) -> Supervisor<S, H2> {
        Supervisor {
            fetcher: self.fetcher,
            hasher,
            config: self.config,
            progress: self.progress,
        }
    }

    /// Publish a [`ScanStatus`] after every tick.
    pub fn with_progress(mut self, sender: watch::Sender<ScanStatus>) -> Self {
        self.progress = Some(sender);
        self
    }

    pub fn fetcher(&self) -> &RecordFetcher<S> {
        &self.fetcher
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Scan forward from `start` until the chain ends or a check fails.
    ///
    /// `anchor` is the digest of the ledger before `start`. Without it the
    /// first record's parent link cannot be checked and the report says so.
    pub async fn run(&self, start: u64, anchor: Option<Digest>) -> ScanReport {
        let anchored = anchor.is_some();
        let mut cursor = Cursor::new(start, anchor);
        let mut run_digest = RunDigest::new();
        let mut first_linkage = None;

        tracing::info!(start, anchored, "Scan started");
        self.publish(ScanState::Running, &cursor);

        let outcome = loop {
            match self.tick(&mut cursor, &mut run_digest, &mut first_linkage).await {
                Ok(Tick::Advanced) => tokio::task::yield_now().await,
                Ok(Tick::Exhausted) => break Ok(()),
                Err(e) => break Err(e),
            }
        };

        let (state, error) = match outcome {
            Ok(()) => {
                tracing::info!(
                    next = cursor.expected_index(),
                    verified = cursor.verified_count(),
                    "No further ledgers, scan complete"
                );
                (ScanState::HaltedExhausted, None)
            }
            Err(e) => {
                let kind = e.kind();
                tracing::error!(
                    index = e.index().unwrap_or_else(|| cursor.expected_index()),
                    invariant = kind.as_str(),
                    error = %e,
                    "Scan halted"
                );
                metrics::increment_counter!(telemetry::SCAN_HALTS, "kind" => kind.as_str());
                (ScanState::HaltedError(kind), Some(e))
            }
        };

        self.publish(state, &cursor);
        let proof = run_digest.into_proof(&cursor, anchored);
        ScanReport {
            state,
            error,
            cursor,
            first_linkage,
            proof,
        }
    }

    async fn tick(
        &self,
        cursor: &mut Cursor,
        run_digest: &mut RunDigest,
        first_linkage: &mut Option<Linkage>,
    ) -> Result<Tick, VerifyError> {
        let index = cursor.expected_index();

        let record = match self.fetcher.get(index).await? {
            FetchOutcome::Found(record) => record,
            FetchOutcome::NotFound => {
                if self.config.gap_policy == GapPolicy::Detect {
                    if let Some(next_present) = self.fetcher.first_present_after(index).await? {
                        return Err(VerifyError::Gap {
                            missing: index,
                            next_present,
                        });
                    }
                }
                return Ok(Tick::Exhausted);
            }
        };

        let parent = cursor.expected_parent().copied();
        let linkage = verify_record(&self.hasher, &record, index, parent.as_ref())?;

        if first_linkage.is_none() {
            if linkage == Linkage::Unverified {
                tracing::warn!(index, "No known predecessor digest, parent link of first ledger not verified");
            }
            *first_linkage = Some(linkage);
        }

        cursor.advance(&record);
        run_digest.update(record.index, &record.ledger_hash);

        metrics::increment_counter!(telemetry::RECORDS_VERIFIED);
        metrics::gauge!(telemetry::LAST_VERIFIED_INDEX, index as f64);

        let interval = self.config.progress_interval;
        if interval > 0 && index % interval == 0 {
            tracing::info!(
                index,
                time = %chrono::Utc::now().to_rfc3339(),
                verified = cursor.verified_count(),
                "Verified ledger"
            );
        }
        tracing::debug!(index, hash = %record.ledger_hash, "Ledger verified");

        self.publish(ScanState::Running, cursor);
        Ok(Tick::Advanced)
    }

    fn publish(&self, state: ScanState, cursor: &Cursor) {
        if let Some(sender) = &self.progress {
            sender.send_replace(ScanStatus::from_cursor(state, cursor));
        }
    }
}
