//! Document store read API.

use crate::error::{Result, StoreError};
use ledgercheck_kernel::LedgerRecord;
use std::future::Future;
use std::sync::Arc;

/// Read side of a keyed document store holding one ledger per key.
///
/// Keys sort lexicographically; with fixed-width keys that is index order.
pub trait DocumentStore: Send + Sync {
    /// The first `limit` keys in the store.
    fn list_earliest(&self, limit: usize) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Up to `limit` keys greater than or equal to `start_key`.
    fn list_from(
        &self,
        start_key: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Raw document bytes, or `None` when no document exists under `key`.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>>> + Send;
}

impl<S: DocumentStore> DocumentStore for Arc<S> {
    fn list_earliest(&self, limit: usize) -> impl Future<Output = Result<Vec<String>>> + Send {
        (**self).list_earliest(limit)
    }

    fn list_from(
        &self,
        start_key: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<String>>> + Send {
        (**self).list_from(start_key, limit)
    }

    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>>> + Send {
        (**self).get(key)
    }
}

/// Validate a raw document against the ledger record schema.
///
/// This is the only place untyped JSON is turned into a record; anything
/// that does not fit the schema is rejected here as malformed.
pub fn decode_record(key: &str, bytes: &[u8]) -> Result<LedgerRecord> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::Malformed {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

pub fn encode_record(record: &LedgerRecord) -> Result<Vec<u8>> {
    serde_json::to_vec(record).map_err(|e| StoreError::Malformed {
        key: crate::key::index_key(record.index),
        reason: e.to_string(),
    })
}
