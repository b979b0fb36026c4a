// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Transaction-set hashing.
//!
//! The digest a ledger commits to for its transactions is defined by the
//! ledger protocol, not by this crate. It is modelled as a pure function
//! behind [`TxHasher`] so the verifier never depends on a particular tree
//! layout. [`JsonShaMapHasher`] uses the protocol's tree shape and hash
//! prefixes over canonical JSON blobs. It does not reproduce the protocol's
//! binary transaction encoding, so its digests only match chains sealed with
//! it.

pub mod canonical;
pub mod shamap;

use crate::config::PREFIX_LEDGER;
use crate::error::HashError;
use crate::types::{Digest, Transaction};
use sha2::{Digest as _, Sha512};

pub use shamap::JsonShaMapHasher;

/// Canonical hashing rules for transactions and transaction sets.
pub trait TxHasher: Send + Sync {
    /// Id of a single transaction, computed from its canonical encoding.
    fn transaction_id(&self, tx: &Transaction) -> Result<Digest, HashError>;

    /// Digest committing to the whole ordered transaction set of a ledger.
    fn transaction_set_digest(&self, txs: &[Transaction]) -> Result<Digest, HashError>;
}

/// First half of SHA-512 over the concatenation of `parts`.
pub fn sha512_half(parts: &[&[u8]]) -> Digest {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    finish_half(hasher)
}

pub(crate) fn finish_half(hasher: Sha512) -> Digest {
    let full = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&full[..32]);
    Digest(out)
}

/// Header digest used for `ledger_hash` by the synthetic chains in tests and
/// fixtures. The verifier itself never recomputes ledger hashes.
pub fn ledger_header_digest(index: u64, parent: Option<&Digest>, tx_hash: &Digest) -> Digest {
    let parent = parent.copied().unwrap_or(Digest::ZERO);
    sha512_half(&[
        &PREFIX_LEDGER,
        &index.to_be_bytes(),
        parent.as_bytes(),
        tx_hash.as_bytes(),
    ])
}
