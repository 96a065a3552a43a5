//! Input loading - parse and validate a ROR data dump
//!
//! The dump is one JSON array of organization records, parsed fully before
//! any table is built. Parsing tries the SIMD-accelerated path first and
//! falls back to serde_json, which also supplies the error position when
//! the file is genuinely malformed.

use crate::config::ID_FIELD;
use crate::error::{ConvertError, Result};
use crate::tables::Record;
use log::debug;
use serde_json::Value;
use std::path::Path;

/// Load the record collection from a dump file.
///
/// Fatal conditions: unreadable file, unparseable JSON, a top level that is
/// not an array, a record that is not an object, a record without a string
/// `id`. The returned records keep their input order.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let bytes = std::fs::read(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("read {} bytes from {}", bytes.len(), path.display());

    let dump = parse_dump(bytes).map_err(|source| ConvertError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Array(items) = dump else {
        return Err(ConvertError::NotAnArray {
            path: path.to_path_buf(),
        });
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(record) => {
                if !matches!(record.get(ID_FIELD), Some(Value::String(_))) {
                    return Err(ConvertError::MissingId { index });
                }
                records.push(record);
            }
            _ => return Err(ConvertError::NotAnObject { index }),
        }
    }

    Ok(records)
}

/// simd-json mutates its buffer in place, so the fast path gets its own
/// copy and the fallback re-parses the pristine bytes.
fn parse_dump(bytes: Vec<u8>) -> std::result::Result<Value, serde_json::Error> {
    let mut simd_buffer = bytes.clone();
    if let Ok(value) = simd_json::serde::from_slice::<Value>(&mut simd_buffer) {
        return Ok(value);
    }
    serde_json::from_slice(&bytes)
}
