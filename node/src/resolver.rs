// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Start-index resolution.

use crate::errors::VerifyError;
use ledgercheck_store::{parse_key, DocumentStore};

/// An explicit index wins unchecked; otherwise the store's earliest key is
/// the start.
pub async fn resolve_start<S: DocumentStore>(
    store: &S,
    explicit: Option<u64>,
) -> Result<u64, VerifyError> {
    if let Some(index) = explicit {
        return Ok(index);
    }

    let keys = store
        .list_earliest(1)
        .await
        .map_err(|e| VerifyError::Resolution(format!("listing failed: {}", e)))?;

    let first = keys
        .first()
        .ok_or_else(|| VerifyError::Resolution("store holds no ledgers".to_string()))?;

    parse_key(first).map_err(|e| VerifyError::Resolution(e.to_string()))
}
