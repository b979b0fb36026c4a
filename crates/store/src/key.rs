//! Document keys.
//!
//! Ledgers are stored under their index written as zero-padded decimal, ten
//! digits wide (`0000012345`). Existing stores rely on this exact form, so
//! both directions live here.

use crate::error::{Result, StoreError};

pub const KEY_WIDTH: usize = 10;

/// Key for a ledger index. Indices wider than [`KEY_WIDTH`] are not truncated.
pub fn index_key(index: u64) -> String {
    format!("{:0width$}", index, width = KEY_WIDTH)
}

/// Parse a stored key back into a ledger index.
pub fn parse_key(key: &str) -> Result<u64> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    key.parse::<u64>()
        .map_err(|_| StoreError::InvalidKey(key.to_string()))
}
