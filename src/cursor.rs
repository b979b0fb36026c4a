// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Verification cursor.

use crate::types::{Digest, LedgerRecord};

/// Progress of one scan: where it started, what anchored it, and the last
/// record that passed every check.
///
/// The cursor is a plain owned value. It is advanced exactly once per
/// verified record and never shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    start_index: u64,
    anchor: Option<Digest>,
    last_verified_index: Option<u64>,
    last_verified_hash: Option<Digest>,
}

impl Cursor {
    /// `anchor` is the digest of the record preceding `start_index`, if the
    /// caller knows it.
    pub fn new(start_index: u64, anchor: Option<Digest>) -> Self {
        Self {
            start_index,
            anchor,
            last_verified_index: None,
            last_verified_hash: None,
        }
    }

    pub fn start_index(&self) -> u64 {
        self.start_index
    }

    pub fn anchor(&self) -> Option<&Digest> {
        self.anchor.as_ref()
    }

    pub fn last_verified_index(&self) -> Option<u64> {
        self.last_verified_index
    }

    pub fn last_verified_hash(&self) -> Option<&Digest> {
        self.last_verified_hash.as_ref()
    }

    /// Index the next fetched record must carry.
    pub fn expected_index(&self) -> u64 {
        match self.last_verified_index {
            Some(last) => last.saturating_add(1),
            None => self.start_index,
        }
    }

    /// Digest the next record must declare as its parent, if one is known.
    pub fn expected_parent(&self) -> Option<&Digest> {
        self.last_verified_hash.as_ref().or(self.anchor.as_ref())
    }

    /// Number of records verified so far.
    pub fn verified_count(&self) -> u64 {
        match self.last_verified_index {
            Some(last) => last.saturating_sub(self.start_index) + 1,
            None => 0,
        }
    }

    /// Record that `record` passed linkage and transaction checks.
    pub fn advance(&mut self, record: &LedgerRecord) {
        self.last_verified_index = Some(record.index);
        self.last_verified_hash = Some(record.ledger_hash);
    }
}
