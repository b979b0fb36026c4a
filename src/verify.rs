// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Transaction-hash verification.

use crate::error::{ChainError, ChainResult, HashError};
use crate::hash::TxHasher;
use crate::link::{check_link, Linkage};
use crate::types::{Digest, LedgerRecord};

/// Recompute the transaction-set digest of `record` and compare it with the
/// `transaction_hash` the record declares.
///
/// Transactions that declare their own id are checked against the
/// recomputed id first, so an altered transaction is reported by position.
pub fn verify_tx_hash<H: TxHasher + ?Sized>(hasher: &H, record: &LedgerRecord) -> ChainResult<()> {
    let index = record.index;

    for (position, tx) in record.transactions.iter().enumerate() {
        let Some(declared) = tx.hash else {
            continue;
        };
        let computed = hasher
            .transaction_id(tx)
            .map_err(|e| hash_failure(index, e))?;
        if computed != declared {
            return Err(ChainError::TxIdMismatch {
                index,
                position,
                declared,
                computed,
            });
        }
    }

    let computed = hasher
        .transaction_set_digest(&record.transactions)
        .map_err(|e| hash_failure(index, e))?;

    if computed != record.tx_hash {
        return Err(ChainError::TxHashMismatch {
            index,
            declared: record.tx_hash,
            computed,
        });
    }

    Ok(())
}

/// Run the linkage check and then the transaction-hash check.
pub fn verify_record<H: TxHasher + ?Sized>(
    hasher: &H,
    record: &LedgerRecord,
    expected_index: u64,
    expected_parent: Option<&Digest>,
) -> ChainResult<Linkage> {
    let linkage = check_link(record, expected_index, expected_parent)?;
    verify_tx_hash(hasher, record)?;
    Ok(linkage)
}

fn hash_failure(index: u64, err: HashError) -> ChainError {
    match err {
        HashError::DuplicateTransaction(id) => ChainError::DuplicateTransaction { index, id },
        other => ChainError::Encoding {
            index,
            reason: other.to_string(),
        },
    }
}
