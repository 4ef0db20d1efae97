use std::{fmt::Display, fs, path::Path};

use serde_json::{Map, Value};

use crate::{
    error::{Error, Result},
    persist::write_atomic,
};

/// A JSON object keyed by tag or word.
pub type Dictionary = Map<String, Value>;

pub fn load(path: impl AsRef<Path>) -> Result<Dictionary> {
    let path = path.as_ref();
    let buffer = fs::read(path).map_err(|e| Error::io(e, path))?;
    match serde_json::from_slice::<Value>(&buffer)? {
        Value::Object(dict) => Ok(dict),
        _ => Err(Error::NotAnObject(path.to_path_buf())),
    }
}

pub fn save(dict: &Dictionary, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let buffer = serde_json::to_vec_pretty(dict)?;
    write_atomic(path, &buffer)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeReport {
    pub primary: usize,
    pub secondary: usize,
    pub merged: usize,
    pub conflicts: usize,
}

impl Display for MergeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Primary keys: {}", self.primary)?;
        writeln!(f, "Secondary keys: {}", self.secondary)?;
        writeln!(f, "Merged keys: {}", self.merged)?;
        write!(f, "Conflicts (resolved in favor of primary): {}", self.conflicts)
    }
}

/// Union of both dictionaries; on a shared key the primary value wins.
pub fn merge(primary: &Dictionary, secondary: &Dictionary) -> (Dictionary, MergeReport) {
    let mut merged = secondary.clone();
    let mut conflicts = 0;
    for (key, value) in primary {
        if merged.insert(key.clone(), value.clone()).is_some() {
            conflicts += 1;
        }
    }
    let report = MergeReport {
        primary: primary.len(),
        secondary: secondary.len(),
        merged: merged.len(),
        conflicts,
    };
    (merged, report)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeReport {
    pub total: usize,
    pub replaced: usize,
}

impl Display for NormalizeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total keys processed: {}", self.total)?;
        write!(f, "Replaced entries with DEFAULT: {}", self.replaced)
    }
}

/// Replaces every `{"DEFAULT": "<text>", ...}` value by `"<text>"`.
pub fn normalize(mut dict: Dictionary) -> (Dictionary, NormalizeReport) {
    let mut replaced = 0;
    for value in dict.values_mut() {
        let default = match value {
            Value::Object(inner) => match inner.get("DEFAULT") {
                Some(Value::String(s)) => s.clone(),
                _ => continue,
            },
            _ => continue,
        };
        *value = Value::String(default);
        replaced += 1;
    }
    let report = NormalizeReport {
        total: dict.len(),
        replaced,
    };
    (dict, report)
}
