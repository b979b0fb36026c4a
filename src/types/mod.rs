// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod digest;
pub mod record;
pub mod transaction;

pub use digest::Digest;
pub use record::LedgerRecord;
pub use transaction::Transaction;
