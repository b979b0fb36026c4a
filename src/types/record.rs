// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Ledger record schema.

use crate::types::digest::Digest;
use crate::types::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// One immutable ledger snapshot as persisted in the document store.
///
/// Field names on the wire follow the existing store documents
/// (`ledger_index`, `transaction_hash`). Unknown keys such as `_id`, `_rev`
/// or `close_time` are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    #[serde(rename = "ledger_index")]
    pub index: u64,

    pub ledger_hash: Digest,

    /// Absent only for the genesis ledger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_hash: Option<Digest>,

    #[serde(rename = "transaction_hash")]
    pub tx_hash: Digest,

    pub transactions: Vec<Transaction>,
}

impl LedgerRecord {
    pub fn is_genesis(&self) -> bool {
        self.parent_hash.is_none()
    }
}
