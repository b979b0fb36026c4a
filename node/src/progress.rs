// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::errors::HaltKind;
use ledgercheck_kernel::{Cursor, Digest};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanState {
    Running,
    HaltedExhausted,
    HaltedError(HaltKind),
}

impl ScanState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ScanState::Running)
    }
}

/// Snapshot of a scan published after every tick. Readers never see the
/// cursor itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanStatus {
    pub state: ScanState,
    pub start_index: u64,
    pub expected_index: u64,
    pub last_verified_index: Option<u64>,
    pub last_verified_hash: Option<Digest>,
    pub verified_count: u64,
    /// RFC 3339 wall-clock time of the snapshot.
    pub updated_at: String,
}

impl ScanStatus {
    pub fn from_cursor(state: ScanState, cursor: &Cursor) -> Self {
        Self {
            state,
            start_index: cursor.start_index(),
            expected_index: cursor.expected_index(),
            last_verified_index: cursor.last_verified_index(),
            last_verified_hash: cursor.last_verified_hash().copied(),
            verified_count: cursor.verified_count(),
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Status before any scan has started.
    pub fn pending(start_index: u64) -> Self {
        Self::from_cursor(ScanState::Running, &Cursor::new(start_index, None))
    }
}
