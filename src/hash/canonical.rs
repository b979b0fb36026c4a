// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Canonical JSON encoding.
//!
//! Object keys are sorted by byte order at every level and no whitespace is
//! emitted, so the same document always produces the same bytes regardless
//! of the key order it was stored with. Numbers keep the exact text they
//! were stored with (serde_json `arbitrary_precision`), so no payload value
//! is rounded before hashing.

use crate::error::HashError;
use serde_json::Value;

pub fn canonical_json(value: &Value) -> Result<Vec<u8>, HashError> {
    let mut out = Vec::new();
    write_value(value, &mut out)?;
    Ok(out)
}

fn write_value(value: &Value, out: &mut Vec<u8>) -> Result<(), HashError> {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

            out.push(b'{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_scalar(&Value::String(key.clone()), out)?;
                out.push(b':');
                write_value(item, out)?;
            }
            out.push(b'}');
        }
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_value(item, out)?;
            }
            out.push(b']');
        }
        scalar => write_scalar(scalar, out)?,
    }
    Ok(())
}

fn write_scalar(value: &Value, out: &mut Vec<u8>) -> Result<(), HashError> {
    serde_json::to_writer(&mut *out, value).map_err(|e| HashError::Serialization(e.to_string()))
}
