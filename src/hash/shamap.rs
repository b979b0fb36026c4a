// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! SHAMap-shaped transaction tree over canonical JSON.
//!
//! # Layout
//! - Leaves are keyed by transaction id.
//! - Inner nodes have 16 children, selected by successive nibbles of the key.
//! - The root is always an inner node. Below it, a branch holding a single
//!   leaf collapses to that leaf.
//! - Empty children hash as 32 zero bytes; an empty tree hashes to zero.
//!
//! # Hashes
//! - id    = SHA512Half("TXN\0" | tx_blob)
//! - leaf  = SHA512Half("SND\0" | VL(tx_blob) | tx_blob | VL(meta_blob) | meta_blob | id)
//! - inner = SHA512Half("MIN\0" | child_0 | ... | child_15)

use crate::config::{BRANCH_FACTOR, MAX_VL_LEN, PREFIX_INNER_NODE, PREFIX_TRANSACTION_ID, PREFIX_TX_NODE};
use crate::error::HashError;
use crate::hash::canonical::canonical_json;
use crate::hash::{finish_half, sha512_half, TxHasher};
use crate::types::{Digest, Transaction};
use sha2::{Digest as _, Sha512};

/// Transaction-set hashing with the protocol's tree layout and prefixes, but
/// canonical JSON in place of the binary transaction encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonShaMapHasher;

/// A hashed leaf, ready to be placed in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafItem {
    pub id: Digest,
    pub hash: Digest,
}

impl TxHasher for JsonShaMapHasher {
    fn transaction_id(&self, tx: &Transaction) -> Result<Digest, HashError> {
        let blob = canonical_json(&tx.body())?;
        Ok(sha512_half(&[&PREFIX_TRANSACTION_ID, &blob]))
    }

    fn transaction_set_digest(&self, txs: &[Transaction]) -> Result<Digest, HashError> {
        let mut items = txs
            .iter()
            .map(transaction_leaf)
            .collect::<Result<Vec<_>, _>>()?;

        if items.is_empty() {
            return Ok(Digest::ZERO);
        }

        items.sort_by(|a, b| a.id.cmp(&b.id));
        if let Some(pair) = items.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(HashError::DuplicateTransaction(pair[0].id));
        }

        Ok(inner_hash(&items, 0))
    }
}

/// Hash one transaction (with its metadata) into a tree leaf.
pub fn transaction_leaf(tx: &Transaction) -> Result<LeafItem, HashError> {
    let blob = canonical_json(&tx.body())?;
    let meta = match &tx.meta {
        Some(meta) => canonical_json(meta)?,
        None => Vec::new(),
    };
    let id = sha512_half(&[&PREFIX_TRANSACTION_ID, &blob]);

    let mut hasher = Sha512::new();
    hasher.update(PREFIX_TX_NODE);
    hasher.update(encode_vl(blob.len())?);
    hasher.update(&blob);
    hasher.update(encode_vl(meta.len())?);
    hasher.update(&meta);
    hasher.update(id.as_bytes());

    Ok(LeafItem {
        id,
        hash: finish_half(hasher),
    })
}

/// `items` must be sorted by id and share their first `depth` nibbles.
fn inner_hash(items: &[LeafItem], depth: usize) -> Digest {
    let mut hasher = Sha512::new();
    hasher.update(PREFIX_INNER_NODE);

    let mut start = 0;
    for branch in 0..BRANCH_FACTOR {
        let len = items[start..]
            .iter()
            .take_while(|item| item.id.nibble(depth) == branch)
            .count();
        let bucket = &items[start..start + len];

        let child = match bucket {
            [] => Digest::ZERO,
            [leaf] => leaf.hash,
            _ => inner_hash(bucket, depth + 1),
        };
        hasher.update(child.as_bytes());
        start += len;
    }

    finish_half(hasher)
}

/// Variable-length prefix for a blob of `len` bytes (1 to 3 bytes).
pub fn encode_vl(len: usize) -> Result<Vec<u8>, HashError> {
    if len <= 192 {
        Ok(vec![len as u8])
    } else if len <= 12_480 {
        let l = len - 193;
        Ok(vec![193 + (l >> 8) as u8, (l & 0xFF) as u8])
    } else if len <= MAX_VL_LEN {
        let l = len - 12_481;
        Ok(vec![
            241 + (l >> 16) as u8,
            ((l >> 8) & 0xFF) as u8,
            (l & 0xFF) as u8,
        ])
    } else {
        Err(HashError::BlobTooLarge {
            len,
            max: MAX_VL_LEN,
        })
    }
}
