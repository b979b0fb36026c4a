// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::error::DigestParseError;
use crate::types::{Digest, LedgerRecord};
use serde_json::json;

const HASH_A: &str = "4498B44555AFB3D50506F0BBA28570EBEAA20A8FD4672B8FACB591211EEE330A";

#[test]
fn test_digest_parse_and_display() {
    let d: Digest = HASH_A.parse().unwrap();
    assert_eq!(d.to_string(), HASH_A);

    // Lower-case input is accepted, display stays upper-case
    let lower: Digest = HASH_A.to_lowercase().parse().unwrap();
    assert_eq!(lower, d);
    assert_eq!(lower.to_string(), HASH_A);
}

#[test]
fn test_digest_rejects_bad_text() {
    let short = "ABCD".parse::<Digest>();
    assert_eq!(
        short,
        Err(DigestParseError::InvalidLength { expected: 64, found: 4 })
    );

    let not_hex = "Z".repeat(64).parse::<Digest>();
    assert_eq!(
        not_hex,
        Err(DigestParseError::InvalidHex(hex::FromHexError::InvalidHexCharacter {
            c: 'Z',
            index: 0
        }))
    );
}

#[test]
fn test_digest_nibbles() {
    let d: Digest = HASH_A.parse().unwrap();
    assert_eq!(d.nibble(0), 0x4);
    assert_eq!(d.nibble(1), 0x4);
    assert_eq!(d.nibble(2), 0x9);
    assert_eq!(d.nibble(3), 0x8);
    assert_eq!(d.nibble(63), 0xA);
}

#[test]
fn test_record_decodes_store_document() {
    let doc = json!({
        "_id": "0000000007",
        "_rev": "1-abc",
        "ledger_index": 7,
        "ledger_hash": HASH_A,
        "parent_hash": HASH_A.to_lowercase(),
        "transaction_hash": "0".repeat(64),
        "close_time": 123,
        "transactions": [{
            "Account": "rAlice",
            "TransactionType": "Payment",
            "Amount": "100",
            "hash": HASH_A,
            "metaData": { "TransactionResult": "tesSUCCESS" }
        }]
    });

    let record: LedgerRecord = serde_json::from_value(doc).unwrap();
    assert_eq!(record.index, 7);
    assert!(!record.is_genesis());
    assert!(record.tx_hash.is_zero());

    let tx = &record.transactions[0];
    assert_eq!(tx.account, "rAlice");
    assert_eq!(tx.tx_type, "Payment");
    assert_eq!(tx.hash, Some(HASH_A.parse().unwrap()));
    assert!(tx.meta.is_some());
    // Only the protocol payload remains in the flattened map
    assert_eq!(tx.payload.len(), 1);
    assert_eq!(tx.payload["Amount"], json!("100"));
}

#[test]
fn test_record_genesis_has_no_parent() {
    let doc = json!({
        "ledger_index": 0,
        "ledger_hash": HASH_A,
        "parent_hash": null,
        "transaction_hash": "0".repeat(64),
        "transactions": []
    });
    let record: LedgerRecord = serde_json::from_value(doc).unwrap();
    assert!(record.is_genesis());
}

#[test]
fn test_record_rejects_malformed_documents() {
    // Missing transactions
    let missing = json!({
        "ledger_index": 1,
        "ledger_hash": HASH_A,
        "transaction_hash": HASH_A,
    });
    assert!(serde_json::from_value::<LedgerRecord>(missing).is_err());

    // Truncated digest
    let bad_digest = json!({
        "ledger_index": 1,
        "ledger_hash": "ABC",
        "transaction_hash": HASH_A,
        "transactions": []
    });
    assert!(serde_json::from_value::<LedgerRecord>(bad_digest).is_err());

    // Index stored as text
    let bad_index = json!({
        "ledger_index": "1",
        "ledger_hash": HASH_A,
        "transaction_hash": HASH_A,
        "transactions": []
    });
    assert!(serde_json::from_value::<LedgerRecord>(bad_index).is_err());
}
