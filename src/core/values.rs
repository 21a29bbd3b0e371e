//! Key extraction from a Helm values document.
//!
//! Every navigable location in `values.yaml` becomes a dotted key:
//! mappings and sequences yield their own path before their children,
//! sequence elements use their zero-based index as the next segment.

use std::{collections::HashSet, fs, path::Path};

use serde::de::Error as _;
use serde_yaml::Value;

use crate::error::{AnalyzerError, Result};

/// Read and flatten a values file into dotted keys.
///
/// Keys come back depth-first in document order, deduplicated, and
/// restricted to those containing `filter` when one is given.
pub fn extract_keys(path: &Path, filter: Option<&str>) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| AnalyzerError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    extract_keys_from_str(&content, filter).map_err(|source| AnalyzerError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn extract_keys_from_str(
    content: &str,
    filter: Option<&str>,
) -> std::result::Result<Vec<String>, serde_yaml::Error> {
    let mut document: Value = serde_yaml::from_str(content)?;
    document.apply_merge()?;

    match untag(&document) {
        Value::Mapping(_) | Value::Null => {}
        _ => {
            return Err(serde_yaml::Error::custom(
                "root of values document must be a mapping",
            ));
        }
    }

    let mut keys = Vec::new();
    flatten_yaml(&document, None, &mut keys);

    let mut seen = HashSet::new();
    keys.retain(|key| seen.insert(key.clone()));

    if let Some(filter) = filter {
        keys.retain(|key| key.contains(filter));
    }

    Ok(keys)
}

fn flatten_yaml(value: &Value, path: Option<&str>, keys: &mut Vec<String>) {
    if let Some(path) = path {
        keys.push(path.to_string());
    }

    match untag(value) {
        Value::Mapping(map) => {
            for (key, child) in map {
                let child_path = join(path, &segment(key));
                flatten_yaml(child, Some(&child_path), keys);
            }
        }
        Value::Sequence(items) => {
            for (index, child) in items.iter().enumerate() {
                let child_path = join(path, &index.to_string());
                flatten_yaml(child, Some(&child_path), keys);
            }
        }
        _ => {}
    }
}

fn untag(mut value: &Value) -> &Value {
    while let Value::Tagged(tagged) = value {
        value = &tagged.value;
    }
    value
}

fn join(path: Option<&str>, segment: &str) -> String {
    match path {
        Some(path) => format!("{path}.{segment}"),
        None => segment.to_string(),
    }
}

/// Turn a mapping key into a path segment.
///
/// Non-string keys keep their canonical YAML scalar text, so `0: x` and
/// `"0": x` both become segment `0`.
fn segment(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Tagged(tagged) => segment(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => serde_yaml::to_string(key)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
