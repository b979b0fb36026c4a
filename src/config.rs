// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Protocol constants.

/// Length in bytes of every ledger, parent and transaction digest.
pub const DIGEST_LEN: usize = 32;

/// Hash prefix for a transaction id (`"TXN\0"`).
pub const PREFIX_TRANSACTION_ID: [u8; 4] = *b"TXN\0";

/// Hash prefix for a transaction-with-metadata leaf (`"SND\0"`).
pub const PREFIX_TX_NODE: [u8; 4] = *b"SND\0";

/// Hash prefix for an inner tree node (`"MIN\0"`).
pub const PREFIX_INNER_NODE: [u8; 4] = *b"MIN\0";

/// Hash prefix for a ledger header (`"LWR\0"`).
pub const PREFIX_LEDGER: [u8; 4] = *b"LWR\0";

/// Branching factor of the transaction tree.
pub const BRANCH_FACTOR: usize = 16;

/// Largest blob the variable-length prefix can describe.
pub const MAX_VL_LEN: usize = 918_744;
