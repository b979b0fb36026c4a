// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod digest_tests;
pub mod hash_tests;

use crate::hash::{ledger_header_digest, JsonShaMapHasher, TxHasher};
use crate::types::{Digest, LedgerRecord, Transaction};
use serde_json::json;

pub(crate) fn payment(from: &str, to: &str, amount: u64, sequence: u64) -> Transaction {
    Transaction::new(from, "Payment")
        .with_field("Destination", json!(to))
        .with_field("Amount", json!(amount.to_string()))
        .with_field("Sequence", json!(sequence))
        .with_meta(json!({ "TransactionResult": "tesSUCCESS", "TransactionIndex": 0 }))
}

/// A correctly hashed record at `index` linked to `parent`.
pub(crate) fn sealed_record(index: u64, parent: Option<Digest>, transactions: Vec<Transaction>) -> LedgerRecord {
    let tx_hash = JsonShaMapHasher.transaction_set_digest(&transactions).unwrap();
    LedgerRecord {
        index,
        ledger_hash: ledger_header_digest(index, parent.as_ref(), &tx_hash),
        parent_hash: parent,
        tx_hash,
        transactions,
    }
}

pub(crate) fn chain(len: u64) -> Vec<LedgerRecord> {
    let mut records: Vec<LedgerRecord> = Vec::new();
    for index in 0..len {
        let parent = records.last().map(|r| r.ledger_hash);
        let txs = (0..index % 4)
            .map(|n| payment("rAlice", "rBob", 10 * index + n, n))
            .collect();
        records.push(sealed_record(index, parent, txs));
    }
    records
}
