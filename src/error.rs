use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Fatal failure anywhere in the load pipeline (decrypt, fallback read,
    /// parse). The cause text is caller-visible contract: structured errors
    /// carry their `Error: ...` form, raw tool stderr is embedded verbatim.
    #[error("Failed to load secrets for environment {environment}: {cause}")]
    Load { environment: String, cause: String },

    #[error("Required secret missing: {0}")]
    RequiredSecretMissing(String),

    #[error("Secret not found or not a string: {0}")]
    SecretNotString(String),

    #[error("sops is not installed or not on PATH")]
    SopsMissing,

    #[error("encryption failed for {path}: {message}")]
    Encrypt { path: PathBuf, message: String },

    #[error("decryption failed for {path}: {message}")]
    Decrypt { path: PathBuf, message: String },

    #[error("updatekeys failed for {path}: {message}")]
    UpdateKeys { path: PathBuf, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
