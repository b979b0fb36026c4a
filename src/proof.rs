// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Scan proofs.

use crate::cursor::Cursor;
use crate::types::Digest;
use serde::{Deserialize, Serialize};

/// Summary of a finished scan that can be compared across runs.
///
/// `run_digest` is a BLAKE3 hash over every verified `(index, ledger_hash)`
/// pair in scan order. Two scans over the same unchanged chain from the same
/// start produce the same proof.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanProof {
    pub start_index: u64,
    pub last_verified_index: Option<u64>,
    pub last_verified_hash: Option<Digest>,
    pub verified_count: u64,
    /// Whether the first record was checked against a known predecessor.
    pub anchored: bool,
    pub run_digest: Digest,
}

/// Running BLAKE3 hash of the verified sequence.
#[derive(Debug, Clone)]
pub struct RunDigest {
    hasher: blake3::Hasher,
}

impl RunDigest {
    pub fn new() -> Self {
        Self {
            hasher: blake3::Hasher::new(),
        }
    }

    pub fn update(&mut self, index: u64, ledger_hash: &Digest) {
        self.hasher.update(&index.to_le_bytes());
        self.hasher.update(ledger_hash.as_bytes());
    }

    pub fn finalize(&self) -> Digest {
        Digest(*self.hasher.finalize().as_bytes())
    }

    pub fn into_proof(self, cursor: &Cursor, anchored: bool) -> ScanProof {
        ScanProof {
            start_index: cursor.start_index(),
            last_verified_index: cursor.last_verified_index(),
            last_verified_hash: cursor.last_verified_hash().copied(),
            verified_count: cursor.verified_count(),
            anchored,
            run_digest: self.finalize(),
        }
    }
}

impl Default for RunDigest {
    fn default() -> Self {
        Self::new()
    }
}
