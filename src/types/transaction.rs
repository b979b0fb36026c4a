// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Transaction entries as stored inside a ledger document.

use crate::types::digest::Digest;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One transaction of a ledger, with its execution metadata.
///
/// `Account` and `TransactionType` are lifted out because every transaction
/// carries them. Everything else the protocol defines for the transaction
/// type stays in `payload` verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "Account")]
    pub account: String,

    #[serde(rename = "TransactionType")]
    pub tx_type: String,

    /// Declared transaction id. Not part of the hashed blob.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<Digest>,

    /// Execution metadata. Hashed separately from the transaction blob.
    #[serde(rename = "metaData", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,

    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Transaction {
    pub fn new(account: impl Into<String>, tx_type: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            tx_type: tx_type.into(),
            hash: None,
            meta: None,
            payload: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.payload.insert(key.into(), value);
        self
    }

    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    /// The signed part of the transaction as a JSON object: payload plus
    /// `Account` and `TransactionType`, without metadata or declared id.
    pub fn body(&self) -> Value {
        let mut body = self.payload.clone();
        body.insert("Account".to_string(), Value::String(self.account.clone()));
        body.insert(
            "TransactionType".to_string(),
            Value::String(self.tx_type.clone()),
        );
        Value::Object(body)
    }
}
