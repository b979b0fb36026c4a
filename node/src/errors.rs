// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use ledgercheck_kernel::ChainError;
use ledgercheck_store::StoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Cannot resolve start index: {0}")]
    Resolution(String),
    #[error("Failed to fetch ledger {index}: {source}")]
    Fetch {
        index: u64,
        #[source]
        source: StoreError,
    },
    #[error(transparent)]
    Chain(#[from] ChainError),
    #[error("Ledger {missing} is missing but ledger {next_present} is stored")]
    Gap { missing: u64, next_present: u64 },
}

/// Why a scan stopped on an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HaltKind {
    Fetch,
    Index,
    Chain,
    TxHash,
    Gap,
}

impl HaltKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HaltKind::Fetch => "fetch",
            HaltKind::Index => "index",
            HaltKind::Chain => "chain",
            HaltKind::TxHash => "txhash",
            HaltKind::Gap => "gap",
        }
    }
}

impl std::fmt::Display for HaltKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl VerifyError {
    pub fn kind(&self) -> HaltKind {
        match self {
            // Resolution happens before a scan starts; treat it as a read failure.
            VerifyError::Resolution(_) | VerifyError::Fetch { .. } => HaltKind::Fetch,
            VerifyError::Chain(ChainError::IndexMismatch { .. }) => HaltKind::Index,
            VerifyError::Chain(ChainError::ChainLink { .. }) => HaltKind::Chain,
            VerifyError::Chain(_) => HaltKind::TxHash,
            VerifyError::Gap { .. } => HaltKind::Gap,
        }
    }

    /// Ledger index the error is about, if any.
    pub fn index(&self) -> Option<u64> {
        match self {
            VerifyError::Resolution(_) => None,
            VerifyError::Fetch { index, .. } => Some(*index),
            VerifyError::Chain(e) => Some(e.index()),
            VerifyError::Gap { missing, .. } => Some(*missing),
        }
    }
}
