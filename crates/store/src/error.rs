use thiserror::Error;
use std::io;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Store returned HTTP {status} for {url}")]
    Status {
        status: u16,
        url: String,
    },
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Malformed document {key}: {reason}")]
    Malformed {
        key: String,
        reason: String,
    },
    #[error("Invalid ledger key: {0:?}")]
    InvalidKey(String),
}

impl StoreError {
    /// Whether retrying the same read could succeed.
    ///
    /// Malformed documents and bad keys are permanent; connection failures,
    /// timeouts and server-side errors are not.
    pub fn is_transient(&self) -> bool {
        match self {
            StoreError::Transport(_) | StoreError::IoError(_) => true,
            StoreError::Status { status, .. } => *status >= 500 || *status == 429,
            StoreError::Malformed { .. } | StoreError::InvalidKey(_) => false,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        StoreError::Transport(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
