use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::models::Matching;

/// Errors that can occur when storing or reloading a matching
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("{0} is paired with themself")]
    SelfPair(String),

    #[error("{name} is paired with both {first} and {second}")]
    Inconsistent {
        name: String,
        first: String,
        second: String,
    },
}

/// Serialize a matching as a JSON object with one entry per pair
///
/// Keys are the lexicographically smaller name of each pair, sorted, with a
/// four-space indent so diffs between runs stay readable.
pub fn export_matching(matching: &Matching) -> Result<String, PersistenceError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    matching.canonical().serialize(&mut serializer)?;
    buf.push(b'\n');

    Ok(String::from_utf8(buf)?)
}

/// Rebuild the full symmetric matching from its serialized form
///
/// Accepts either direction per pair, and also tolerates files that already
/// list both directions.
pub fn import_matching(serialized: &str) -> Result<Matching, PersistenceError> {
    let stored: BTreeMap<String, String> = serde_json::from_str(serialized)?;
    let mut matching = Matching::new();

    for (a, b) in stored {
        if a == b {
            return Err(PersistenceError::SelfPair(a));
        }
        for (name, partner) in [(&a, &b), (&b, &a)] {
            if let Some(existing) = matching.get(name) {
                if existing != partner.as_str() {
                    return Err(PersistenceError::Inconsistent {
                        name: name.clone(),
                        first: existing.to_string(),
                        second: partner.clone(),
                    });
                }
            }
        }
        matching.insert(a, b);
    }

    Ok(matching)
}

/// Write the matching to `path`
pub fn write_matching<P: AsRef<Path>>(path: P, matching: &Matching) -> Result<(), PersistenceError> {
    fs::write(path.as_ref(), export_matching(matching)?)?;
    tracing::info!("Wrote matching to {:?}.", path.as_ref().display().to_string());
    Ok(())
}

/// Reload a matching previously written with [`write_matching`]
pub fn read_matching<P: AsRef<Path>>(path: P) -> Result<Matching, PersistenceError> {
    let contents = fs::read_to_string(path.as_ref())?;
    let matching = import_matching(&contents)?;
    tracing::info!("Read {} pairs from {}", matching.len(), path.as_ref().display());
    Ok(matching)
}
