// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Chain linkage checks.

use crate::error::{ChainError, ChainResult, ParentHash};
use crate::types::{Digest, LedgerRecord};

/// Outcome of a successful linkage check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Linkage {
    /// The record's parent hash equals the predecessor digest.
    Verified,
    /// No predecessor digest was known, so the parent hash was not checked.
    Unverified,
}

/// Check that `record` sits at `expected_index` and links to
/// `expected_parent`.
///
/// The index is checked first. With no `expected_parent` the parent hash
/// cannot be anchored and the result is [`Linkage::Unverified`].
pub fn check_link(
    record: &LedgerRecord,
    expected_index: u64,
    expected_parent: Option<&Digest>,
) -> ChainResult<Linkage> {
    if record.index != expected_index {
        return Err(ChainError::IndexMismatch {
            expected: expected_index,
            found: record.index,
        });
    }

    let Some(expected) = expected_parent else {
        return Ok(Linkage::Unverified);
    };

    if record.parent_hash.as_ref() != Some(expected) {
        return Err(ChainError::ChainLink {
            index: record.index,
            expected: *expected,
            found: ParentHash(record.parent_hash),
        });
    }

    Ok(Linkage::Verified)
}
