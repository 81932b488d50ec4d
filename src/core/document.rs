//! Secrets document model.
//!
//! A decoded YAML secrets payload for one environment: an arbitrarily nested
//! mapping addressed by dot-delimited paths (`a.b.c`). Only string leaves are
//! valid terminal secrets; other node kinds may appear in the document but are
//! rejected when requested as a secret.

use std::collections::BTreeMap;

use serde_yaml::{Mapping, Value};

/// A decoded secrets document.
///
/// The top level must be a mapping. Values are `serde_yaml::Value`, so the
/// string-leaf requirement is a checked match, not a runtime guess.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Mapping,
}

impl Document {
    /// Parse YAML text into a document.
    ///
    /// # Errors
    ///
    /// Returns the underlying YAML error if the text is malformed or the top
    /// level is not a mapping.
    pub fn parse(text: &str) -> Result<Self, serde_yaml::Error> {
        let root: Mapping = serde_yaml::from_str(text)?;
        Ok(Self { root })
    }

    /// Build a document from an existing mapping.
    pub fn from_mapping(root: Mapping) -> Self {
        Self { root }
    }

    /// Resolve a dot-delimited path by sequential nested-key lookup.
    ///
    /// Returns `None` if any segment is missing or an intermediate node is
    /// not a mapping.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.root.get(segments.next()?)?;

        for segment in segments {
            current = current.get(segment)?;
        }

        Some(current)
    }

    /// Resolve a path to a string leaf.
    ///
    /// Returns `None` when the path is absent or resolves to anything other
    /// than a string (a mapping, number, boolean, null, or sequence).
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.lookup(path).and_then(Value::as_str)
    }

    /// Whether a path resolves to a present, non-null value.
    pub fn has(&self, path: &str) -> bool {
        matches!(self.lookup(path), Some(value) if !value.is_null())
    }

    /// Flatten every string leaf into an environment-variable mapping.
    ///
    /// Keys are the path segments from the root joined with `_` and
    /// upper-cased; values are the leaf strings verbatim. Non-string leaves
    /// are not emitted.
    pub fn flatten(&self) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        flatten_into(&self.root, &mut Vec::new(), &mut out);
        out
    }
}

fn flatten_into(map: &Mapping, trail: &mut Vec<String>, out: &mut BTreeMap<String, String>) {
    for (key, value) in map {
        let Some(key) = key.as_str() else {
            continue;
        };

        trail.push(key.to_uppercase());
        match value {
            Value::String(leaf) => {
                out.insert(trail.join("_"), leaf.clone());
            }
            Value::Mapping(nested) => flatten_into(nested, trail, out),
            // Numbers, booleans, nulls, and sequences are not env-var material.
            _ => {}
        }
        trail.pop();
    }
}
