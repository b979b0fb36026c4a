//! Synthetic ledger chains for tests and demos.

use crate::dir::DirStore;
use crate::error::Result;
use ledgercheck_kernel::error::HashError;
use ledgercheck_kernel::hash::ledger_header_digest;
use ledgercheck_kernel::{Digest, LedgerRecord, JsonShaMapHasher, Transaction, TxHasher};
use serde_json::json;
use std::path::Path;

const ACCOUNTS: [&str; 4] = [
    "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
    "rPEPPER7kfTD9w2To4CQk6UCfuHM9c6GDY",
    "rN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH",
    "rLNaPoKeeBjZe2qs6x52yVPZpZ8td4dc6w",
];

/// Transactions for the ledger at `index`: a handful of payments and an
/// offer, varied enough that the transaction tree has inner nodes.
pub fn synthetic_transactions(index: u64) -> Vec<Transaction> {
    let count = index % 5;
    (0..count)
        .map(|n| {
            let from = ACCOUNTS[((index + n) % 4) as usize];
            let to = ACCOUNTS[((index + n + 1) % 4) as usize];
            let tx = if n % 3 == 2 {
                Transaction::new(from, "OfferCreate")
                    .with_field("TakerGets", json!((index * 1000 + n).to_string()))
                    .with_field(
                        "TakerPays",
                        json!({ "currency": "USD", "issuer": to, "value": format!("{}.5", n) }),
                    )
            } else {
                Transaction::new(from, "Payment")
                    .with_field("Destination", json!(to))
                    .with_field("Amount", json!((index * 100 + n).to_string()))
            };
            tx.with_field("Sequence", json!(index * 10 + n))
                .with_field("Fee", json!("10"))
                .with_meta(json!({ "TransactionIndex": n, "TransactionResult": "tesSUCCESS" }))
        })
        .collect()
}

/// A record whose `transaction_hash` and `ledger_hash` are computed from its
/// contents.
pub fn seal(
    index: u64,
    parent: Option<Digest>,
    transactions: Vec<Transaction>,
) -> std::result::Result<LedgerRecord, HashError> {
    let tx_hash = JsonShaMapHasher.transaction_set_digest(&transactions)?;
    Ok(LedgerRecord {
        index,
        ledger_hash: ledger_header_digest(index, parent.as_ref(), &tx_hash),
        parent_hash: parent,
        tx_hash,
        transactions,
    })
}

/// `len` correctly linked records starting at `start`. The first one is a
/// genesis record with no parent.
pub fn generate_chain(start: u64, len: u64) -> std::result::Result<Vec<LedgerRecord>, HashError> {
    let mut records: Vec<LedgerRecord> = Vec::with_capacity(len as usize);
    for index in start..start + len {
        let parent = records.last().map(|r| r.ledger_hash);
        records.push(seal(index, parent, synthetic_transactions(index))?);
    }
    Ok(records)
}

/// Write `records` into `dir` as a [`DirStore`].
pub async fn write_chain(dir: &Path, records: &[LedgerRecord]) -> Result<DirStore> {
    let store = DirStore::new(dir);
    for record in records {
        store.put_record(record).await?;
    }
    Ok(store)
}
