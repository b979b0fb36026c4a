// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::config::{PREFIX_INNER_NODE, PREFIX_TRANSACTION_ID, MAX_VL_LEN};
use crate::error::{ChainError, HashError};
use crate::hash::canonical::canonical_json;
use crate::hash::shamap::{encode_vl, transaction_leaf};
use crate::hash::{sha512_half, JsonShaMapHasher, TxHasher};
use crate::tests::{payment, sealed_record};
use crate::verify::verify_tx_hash;
use crate::types::{Digest, Transaction};
use serde_json::json;

#[test]
fn test_sha512_half_of_empty_input() {
    let expected: Digest = "CF83E1357EEFB8BDF1542850D66D8007D620E4050B5715DC83F4A921D36CE9CE"
        .parse()
        .unwrap();
    assert_eq!(sha512_half(&[]), expected);
}

#[test]
fn test_canonical_json_sorts_keys_at_every_level() {
    let value = json!({ "b": 1, "a": [{ "d": 2, "c": "x" }], "A": null });
    let bytes = canonical_json(&value).unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        r#"{"A":null,"a":[{"c":"x","d":2}],"b":1}"#
    );
}

#[test]
fn test_transaction_id_known_answer() {
    let tx = Transaction::new("rAlice", "Payment")
        .with_field("Destination", json!("rBob"))
        .with_field("Amount", json!("100"));

    let expected: Digest = "4498B44555AFB3D50506F0BBA28570EBEAA20A8FD4672B8FACB591211EEE330A"
        .parse()
        .unwrap();
    assert_eq!(JsonShaMapHasher.transaction_id(&tx).unwrap(), expected);

    // Metadata and declared id are not part of the signed blob
    let mut with_extras = tx
        .clone()
        .with_meta(json!({ "TransactionResult": "tesSUCCESS" }));
    with_extras.hash = Some(Digest::ZERO);
    assert_eq!(JsonShaMapHasher.transaction_id(&with_extras).unwrap(), expected);
}

#[test]
fn test_vl_prefix_boundaries() {
    assert_eq!(encode_vl(0).unwrap(), vec![0]);
    assert_eq!(encode_vl(192).unwrap(), vec![192]);
    assert_eq!(encode_vl(193).unwrap(), vec![193, 0]);
    assert_eq!(encode_vl(12_480).unwrap(), vec![240, 255]);
    assert_eq!(encode_vl(12_481).unwrap(), vec![241, 0, 0]);
    assert_eq!(encode_vl(MAX_VL_LEN).unwrap(), vec![254, 212, 23]);
    assert_eq!(
        encode_vl(MAX_VL_LEN + 1),
        Err(HashError::BlobTooLarge { len: MAX_VL_LEN + 1, max: MAX_VL_LEN })
    );
}

#[test]
fn test_empty_set_hashes_to_zero() {
    assert_eq!(JsonShaMapHasher.transaction_set_digest(&[]).unwrap(), Digest::ZERO);
}

#[test]
fn test_single_transaction_sits_under_root_inner_node() {
    let tx = payment("rAlice", "rBob", 5, 1);
    let leaf = transaction_leaf(&tx).unwrap();

    // Root is an inner node with the leaf in the branch of its first nibble
    let mut children = Vec::with_capacity(16 * 32);
    for branch in 0..16 {
        if branch == leaf.id.nibble(0) {
            children.extend_from_slice(leaf.hash.as_bytes());
        } else {
            children.extend_from_slice(Digest::ZERO.as_bytes());
        }
    }
    let expected = sha512_half(&[&PREFIX_INNER_NODE, &children]);

    assert_eq!(JsonShaMapHasher.transaction_set_digest(&[tx]).unwrap(), expected);
    assert_ne!(expected, leaf.hash);
}

#[test]
fn test_set_digest_ignores_storage_order() {
    let txs: Vec<_> = (0..40).map(|n| payment("rAlice", "rBob", n, n)).collect();
    let mut reversed = txs.clone();
    reversed.reverse();

    let forward = JsonShaMapHasher.transaction_set_digest(&txs).unwrap();
    let backward = JsonShaMapHasher.transaction_set_digest(&reversed).unwrap();
    assert_eq!(forward, backward);
}

#[test]
fn test_set_digest_changes_with_any_payload_or_metadata() {
    let txs: Vec<_> = (0..8).map(|n| payment("rAlice", "rBob", n, n)).collect();
    let original = JsonShaMapHasher.transaction_set_digest(&txs).unwrap();

    let mut altered = txs.clone();
    altered[3].payload.insert("Amount".to_string(), json!("999999"));
    assert_ne!(JsonShaMapHasher.transaction_set_digest(&altered).unwrap(), original);

    let mut altered_meta = txs.clone();
    altered_meta[5].meta = Some(json!({ "TransactionResult": "tecUNFUNDED" }));
    assert_ne!(JsonShaMapHasher.transaction_set_digest(&altered_meta).unwrap(), original);

    let truncated = &txs[..7];
    assert_ne!(JsonShaMapHasher.transaction_set_digest(truncated).unwrap(), original);
}

#[test]
fn test_duplicate_transactions_are_rejected() {
    let tx = payment("rAlice", "rBob", 5, 1);
    let id = JsonShaMapHasher.transaction_id(&tx).unwrap();
    let result = JsonShaMapHasher.transaction_set_digest(&[tx.clone(), tx]);
    assert_eq!(result, Err(HashError::DuplicateTransaction(id)));
}

fn stored_tx(sequence: &str, fee: &str) -> Transaction {
    let text = format!(
        r#"{{"Account":"rAlice","TransactionType":"Payment","Destination":"rBob","Amount":"5","Sequence":{},"Fee":{}}}"#,
        sequence, fee
    );
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_numbers_are_hashed_as_stored() {
    // 1. Integers past 64 bits keep every digit
    let a = stored_tx("123456789012345678901234567", "10");
    let b = stored_tx("123456789012345678901234568", "10");
    let blob = canonical_json(&a.body()).unwrap();
    assert!(String::from_utf8(blob).unwrap().contains("123456789012345678901234567"));
    assert_ne!(
        JsonShaMapHasher.transaction_id(&a).unwrap(),
        JsonShaMapHasher.transaction_id(&b).unwrap()
    );

    // 2. Decimals beyond f64 precision too
    let c = stored_tx("1", "0.30000000000000000001");
    let d = stored_tx("1", "0.3");
    assert_ne!(
        JsonShaMapHasher.transaction_set_digest(&[c]).unwrap(),
        JsonShaMapHasher.transaction_set_digest(&[d]).unwrap()
    );
}

#[test]
fn test_large_number_edit_fails_verification() {
    let sealed = sealed_record(9, None, vec![stored_tx("123456789012345678901234567", "10")]);

    let mut edited = sealed.clone();
    edited.transactions = vec![stored_tx("123456789012345678901234568", "10")];

    assert!(verify_tx_hash(&JsonShaMapHasher, &sealed).is_ok());
    assert!(matches!(
        verify_tx_hash(&JsonShaMapHasher, &edited),
        Err(ChainError::TxHashMismatch { index: 9, .. })
    ));
}

#[test]
fn test_transaction_id_is_over_canonical_json_blob() {
    let tx = payment("rAlice", "rBob", 7, 2);
    let blob = canonical_json(&tx.body()).unwrap();
    assert_eq!(
        JsonShaMapHasher.transaction_id(&tx).unwrap(),
        sha512_half(&[&PREFIX_TRANSACTION_ID, &blob])
    );
}
