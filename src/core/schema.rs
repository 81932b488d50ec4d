//! Required-secret schema.
//!
//! The fixed list of dot-paths every loaded document must satisfy, and the
//! deterministic default document substituted when loading fails entirely.

use serde_yaml::{Mapping, Value};

use crate::core::document::Document;
use crate::error::{Error, Result};

/// Paths that must be present and non-null in every secrets document.
pub const REQUIRED_SECRETS: &[&str] = &[
    "app.environment",
    "app.secret_key",
    "aws.account_id",
    "aws.region",
    "database.password",
];

/// Path of the environment tag inside the document.
pub const ENVIRONMENT_PATH: &str = "app.environment";

/// Validate a document against the required-secret schema.
///
/// # Errors
///
/// Returns `Error::RequiredSecretMissing` for the first required path that is
/// absent or null. A document that decrypted and parsed cleanly but omits a
/// required field fails exactly like a decrypt error would.
pub fn validate(document: &Document) -> Result<()> {
    for path in REQUIRED_SECRETS {
        if !document.has(path) {
            return Err(Error::RequiredSecretMissing((*path).to_string()));
        }
    }
    Ok(())
}

/// The hard-coded fallback document.
///
/// Mirrors the required schema's structure with every leaf empty, except the
/// environment tag, which carries the resolver's environment name.
pub fn default_document(environment: &str) -> Document {
    let mut root = Mapping::new();
    for path in REQUIRED_SECRETS {
        insert_path(&mut root, path, Value::String(String::new()));
    }
    insert_path(
        &mut root,
        ENVIRONMENT_PATH,
        Value::String(environment.to_string()),
    );
    Document::from_mapping(root)
}

/// Insert a value at a dot-delimited path, creating intermediate mappings.
fn insert_path(map: &mut Mapping, path: &str, value: Value) {
    match path.split_once('.') {
        Some((head, rest)) => {
            let key = Value::String(head.to_string());
            let entry = map
                .entry(key)
                .or_insert_with(|| Value::Mapping(Mapping::new()));
            if let Value::Mapping(nested) = entry {
                insert_path(nested, rest, value);
            }
        }
        None => {
            map.insert(Value::String(path.to_string()), value);
        }
    }
}
