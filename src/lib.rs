// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! ledgercheck-kernel: I/O-free ledger chain rules.
//!
//! Record schema, canonical transaction hashing, chain linkage and
//! transaction-hash checks, and the verification cursor. Nothing here
//! touches a store or a clock.

pub mod config;
pub mod error;
pub mod types;
pub mod hash;
pub mod link;
pub mod verify;
pub mod cursor;
pub mod proof;

pub use cursor::Cursor;
pub use error::{ChainError, DigestParseError, HashError};
pub use hash::{JsonShaMapHasher, TxHasher};
pub use link::{check_link, Linkage};
pub use proof::{RunDigest, ScanProof};
pub use types::{Digest, LedgerRecord, Transaction};
pub use verify::{verify_record, verify_tx_hash};

#[cfg(test)]
pub mod tests;
