//! Reading raw transaction records.
//!
//! Input must be a strict JSON array. The content is only ever parsed, never
//! evaluated.

use crate::error::{kind_of, ReportError, Result};
use log::debug;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Loads transaction records from a file.
pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Vec<Value>> {
    let path = path.as_ref();
    let read_error = |source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_error)?;
    let mut content = String::new();
    BufReader::new(file)
        .read_to_string(&mut content)
        .map_err(read_error)?;

    debug!("Read {} bytes from {}", content.len(), path.display());
    load_str(&content)
}

/// Loads transaction records from any reader.
pub fn load_reader<R: Read>(mut reader: R) -> Result<Vec<Value>> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|source| ReportError::Read {
            path: "<reader>".into(),
            source,
        })?;
    load_str(&content)
}

/// Loads transaction records from JSON text.
pub fn load_str(text: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(text).map_err(ReportError::Parse)?;
    match value {
        Value::Array(records) => {
            debug!("Loaded {} records", records.len());
            Ok(records)
        }
        other => Err(ReportError::NotAnArray {
            found: kind_of(&other),
        }),
    }
}
