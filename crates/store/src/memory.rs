//! In-process store.
//!
//! Keeps every fetched key so callers can assert exactly which ledgers a scan
//! touched, and can be told to fail reads to exercise retry handling.

use crate::error::{Result, StoreError};
use crate::key::index_key;
use crate::store::{encode_record, DocumentStore};
use ledgercheck_kernel::LedgerRecord;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: Mutex<BTreeMap<String, Vec<u8>>>,
    fetched: Mutex<Vec<String>>,
    failures: Mutex<HashMap<String, u32>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a LedgerRecord>) -> Result<Self> {
        let store = Self::new();
        for record in records {
            store.insert_record(record)?;
        }
        Ok(store)
    }

    /// Store `record` under its own index key.
    pub fn insert_record(&self, record: &LedgerRecord) -> Result<()> {
        self.insert_record_at(record.index, record)
    }

    /// Store `record` under the key for `index`, whatever index the record
    /// itself declares.
    pub fn insert_record_at(&self, index: u64, record: &LedgerRecord) -> Result<()> {
        self.insert_raw(&index_key(index), encode_record(record)?);
        Ok(())
    }

    pub fn insert_raw(&self, key: &str, bytes: Vec<u8>) {
        lock(&self.docs).insert(key.to_string(), bytes);
    }

    pub fn remove(&self, index: u64) -> Option<Vec<u8>> {
        lock(&self.docs).remove(&index_key(index))
    }

    /// Make the next `times` reads of `index` fail with a transport error.
    pub fn fail_next(&self, index: u64, times: u32) {
        lock(&self.failures).insert(index_key(index), times);
    }

    /// Keys passed to `get`, in call order.
    pub fn fetched_keys(&self) -> Vec<String> {
        lock(&self.fetched).clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.docs).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.docs).is_empty()
    }
}

impl DocumentStore for MemoryStore {
    async fn list_earliest(&self, limit: usize) -> Result<Vec<String>> {
        Ok(lock(&self.docs).keys().take(limit).cloned().collect())
    }

    async fn list_from(&self, start_key: &str, limit: usize) -> Result<Vec<String>> {
        Ok(lock(&self.docs)
            .range(start_key.to_string()..)
            .take(limit)
            .map(|(key, _)| key.clone())
            .collect())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        lock(&self.fetched).push(key.to_string());

        {
            let mut failures = lock(&self.failures);
            if let Some(remaining) = failures.get_mut(key) {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Err(StoreError::Transport(format!(
                        "injected failure reading {}",
                        key
                    )));
                }
            }
        }

        Ok(lock(&self.docs).get(key).cloned())
    }
}
