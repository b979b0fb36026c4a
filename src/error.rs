// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use crate::types::digest::Digest;
use thiserror::Error;

/// A digest could not be parsed from its text form.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DigestParseError {
    #[error("Digest must be {expected} hex characters, found {found}")]
    InvalidLength { expected: usize, found: usize },
    #[error("Invalid hex in digest: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// An invariant of the ledger chain was violated by a stored record.
///
/// Every variant is terminal for a scan: the chain offers no sound way to
/// resume trust past a record that failed one of these checks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("Ledger index mismatch: expected {expected}, record declares {found}")]
    IndexMismatch { expected: u64, found: u64 },

    #[error("Broken chain at ledger {index}: parent_hash is {found}, predecessor hash is {expected}")]
    ChainLink {
        index: u64,
        expected: Digest,
        found: ParentHash,
    },

    #[error("Transaction hash mismatch at ledger {index}: declared {declared}, computed {computed}")]
    TxHashMismatch {
        index: u64,
        declared: Digest,
        computed: Digest,
    },

    #[error("Transaction {position} of ledger {index} declares id {declared}, computed {computed}")]
    TxIdMismatch {
        index: u64,
        position: usize,
        declared: Digest,
        computed: Digest,
    },

    #[error("Ledger {index} contains transaction {id} more than once")]
    DuplicateTransaction { index: u64, id: Digest },

    #[error("Cannot encode transactions of ledger {index}: {reason}")]
    Encoding { index: u64, reason: String },
}

impl ChainError {
    /// The ledger index at which the violation was detected.
    pub fn index(&self) -> u64 {
        match self {
            ChainError::IndexMismatch { expected, .. } => *expected,
            ChainError::ChainLink { index, .. }
            | ChainError::TxHashMismatch { index, .. }
            | ChainError::TxIdMismatch { index, .. }
            | ChainError::DuplicateTransaction { index, .. }
            | ChainError::Encoding { index, .. } => *index,
        }
    }

    /// Short name of the violated invariant, used in logs and metrics.
    pub fn invariant(&self) -> &'static str {
        match self {
            ChainError::IndexMismatch { .. } => "index",
            ChainError::ChainLink { .. } => "chain",
            _ => "txhash",
        }
    }
}

/// The parent digest a record declared, which may be missing entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentHash(pub Option<Digest>);

impl core::fmt::Display for ParentHash {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.0 {
            Some(d) => write!(f, "{}", d),
            None => f.write_str("<none>"),
        }
    }
}

/// Failure while computing a transaction-set digest.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("Duplicate transaction id {0}")]
    DuplicateTransaction(Digest),
    #[error("Blob of {len} bytes exceeds the variable-length limit of {max}")]
    BlobTooLarge { len: usize, max: usize },
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

pub type ChainResult<T> = core::result::Result<T, ChainError>;
