// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Typed, retrying reads of single ledgers.

use crate::config::RetryPolicy;
use crate::errors::VerifyError;
use crate::telemetry;
use ledgercheck_kernel::LedgerRecord;
use ledgercheck_store::{decode_record, index_key, parse_key, DocumentStore, StoreError};

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Found(LedgerRecord),
    NotFound,
}

pub struct RecordFetcher<S> {
    store: S,
    retry: RetryPolicy,
}

impl<S: DocumentStore> RecordFetcher<S> {
    pub fn new(store: S, retry: RetryPolicy) -> Self {
        Self { store, retry }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read and validate the ledger at `index`.
    pub async fn get(&self, index: u64) -> Result<FetchOutcome, VerifyError> {
        let key = index_key(index);
        let bytes = self
            .read_with_retry(&key)
            .await
            .map_err(|source| VerifyError::Fetch { index, source })?;

        match bytes {
            None => Ok(FetchOutcome::NotFound),
            Some(bytes) => decode_record(&key, &bytes)
                .map(FetchOutcome::Found)
                .map_err(|source| VerifyError::Fetch { index, source }),
        }
    }

    async fn read_with_retry(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut attempt = 0;
        loop {
            match self.store.get(key).await {
                Err(e) if e.is_transient() && attempt < self.retry.max_retries => {
                    attempt += 1;
                    let delay = self.retry.backoff(attempt);
                    tracing::warn!(key, attempt, ?delay, error = %e, "Transient read failure, retrying");
                    metrics::increment_counter!(telemetry::FETCH_RETRIES);
                    tokio::time::sleep(delay).await;
                }
                other => return other,
            }
        }
    }

    /// Earliest stored index strictly after `index`.
    pub async fn first_present_after(&self, index: u64) -> Result<Option<u64>, VerifyError> {
        let Some(next) = index.checked_add(1) else {
            return Ok(None);
        };
        let keys = self
            .store
            .list_from(&index_key(next), 1)
            .await
            .map_err(|source| VerifyError::Fetch { index, source })?;

        // Non-ledger keys (design documents) sort after every index key.
        Ok(keys.first().and_then(|key| parse_key(key).ok()))
    }
}
