// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod config;
pub mod errors;
pub mod telemetry;
pub mod resolver;
pub mod fetcher;
pub mod progress;
pub mod supervisor;
pub mod server;

pub use config::{GapPolicy, RetryPolicy, VerifierConfig};
pub use errors::{HaltKind, VerifyError};
pub use fetcher::{FetchOutcome, RecordFetcher};
pub use progress::{ScanState, ScanStatus};
pub use resolver::resolve_start;
pub use supervisor::{ScanReport, Supervisor};
