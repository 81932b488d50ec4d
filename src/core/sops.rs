//! Batch sops operations over the secrets tree.
//!
//! Maintains `*.dec.yaml` / `*.enc.yaml` twins: encrypt edited plaintext
//! documents, decrypt for editing, and refresh recipient keys. Encryption is
//! skipped when the encrypted twin already matches the source, so re-runs
//! don't churn sops metadata.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::core::constants;
use crate::core::runner::CommandRunner;
use crate::error::{Error, Result};

/// Encrypt every `*.dec.yaml` under `base` into its `*.enc.yaml` twin.
///
/// Sources that are empty or not valid YAML are skipped with a warning, as
/// are sources whose encrypted twin already decrypts to identical content.
/// With `update_keys`, `sops updatekeys` runs on each freshly written file;
/// a key-update failure downgrades to a warning since the encryption itself
/// succeeded.
///
/// Returns the number of files encrypted.
///
/// # Errors
///
/// `Error::SopsMissing` when sops is not on PATH, `Error::Encrypt` when an
/// invocation fails or produces empty output.
pub fn encrypt_all<R: CommandRunner>(runner: &R, base: &Path, update_keys: bool) -> Result<usize> {
    require_sops(runner)?;

    let mut encrypted = 0;
    for dec_file in find_documents(base, constants::PLAINTEXT_SUFFIX)? {
        let source = std::fs::read_to_string(&dec_file)?;
        if source.trim().is_empty() || serde_yaml::from_str::<serde_yaml::Value>(&source).is_err() {
            warn!(path = %dec_file.display(), "skipping: source file is empty or invalid YAML");
            continue;
        }

        let enc_file = twin(&dec_file, constants::PLAINTEXT_SUFFIX, constants::ENCRYPTED_SUFFIX);
        if !needs_encryption(runner, &source, &enc_file) {
            debug!(path = %dec_file.display(), "skipping: no changes detected");
            continue;
        }

        let path_arg = dec_file.display().to_string();
        let output = runner
            .run(
                constants::SOPS_TOOL,
                &[
                    "--input-type",
                    "yaml",
                    "--output-type",
                    "yaml",
                    "-e",
                    path_arg.as_str(),
                ],
            )
            .map_err(|e| Error::Encrypt {
                path: dec_file.clone(),
                message: e.to_string(),
            })?;

        if output.trim().is_empty() {
            return Err(Error::Encrypt {
                path: dec_file.clone(),
                message: "encryption produced empty output".to_string(),
            });
        }

        std::fs::write(&enc_file, &output)?;
        info!(from = %dec_file.display(), to = %enc_file.display(), "encrypted");
        encrypted += 1;

        if update_keys {
            if let Err(err) = update_keys_file(runner, &enc_file) {
                warn!(path = %enc_file.display(), error = %err, "key update failed, encryption kept");
            }
        }
    }

    Ok(encrypted)
}

/// Decrypt every `*.enc.yaml` under `base` into its `*.dec.yaml` twin.
///
/// Returns the number of files decrypted.
///
/// # Errors
///
/// `Error::SopsMissing` when sops is not on PATH, `Error::Decrypt` when an
/// invocation fails or the output is not valid YAML (the partial output file
/// is removed).
pub fn decrypt_all<R: CommandRunner>(runner: &R, base: &Path) -> Result<usize> {
    require_sops(runner)?;

    let mut decrypted = 0;
    for enc_file in find_documents(base, constants::ENCRYPTED_SUFFIX)? {
        let path_arg = enc_file.display().to_string();
        let output = runner
            .run(
                constants::SOPS_TOOL,
                &[
                    "--input-type",
                    "yaml",
                    "--output-type",
                    "yaml",
                    "-d",
                    path_arg.as_str(),
                ],
            )
            .map_err(|e| Error::Decrypt {
                path: enc_file.clone(),
                message: e.to_string(),
            })?;

        let dec_file = twin(&enc_file, constants::ENCRYPTED_SUFFIX, constants::PLAINTEXT_SUFFIX);
        std::fs::write(&dec_file, &output)?;

        if serde_yaml::from_str::<serde_yaml::Value>(&output).is_err() {
            std::fs::remove_file(&dec_file)?;
            return Err(Error::Decrypt {
                path: enc_file.clone(),
                message: "decryption produced invalid YAML".to_string(),
            });
        }

        info!(from = %enc_file.display(), to = %dec_file.display(), "decrypted");
        decrypted += 1;
    }

    Ok(decrypted)
}

/// Run `sops updatekeys` on every `*.enc.yaml` under `base`.
///
/// Returns the number of files updated.
///
/// # Errors
///
/// `Error::SopsMissing` when sops is not on PATH, `Error::UpdateKeys` when an
/// invocation fails.
pub fn update_keys_all<R: CommandRunner>(runner: &R, base: &Path) -> Result<usize> {
    require_sops(runner)?;

    let mut updated = 0;
    for enc_file in find_documents(base, constants::ENCRYPTED_SUFFIX)? {
        update_keys_file(runner, &enc_file)?;
        info!(path = %enc_file.display(), "keys updated");
        updated += 1;
    }

    Ok(updated)
}

fn require_sops<R: CommandRunner>(runner: &R) -> Result<()> {
    if runner.lookup(constants::SOPS_TOOL).is_none() {
        return Err(Error::SopsMissing);
    }
    Ok(())
}

fn update_keys_file<R: CommandRunner>(runner: &R, enc_file: &Path) -> Result<()> {
    let path_arg = enc_file.display().to_string();
    runner
        .run(constants::SOPS_TOOL, &["updatekeys", "--yes", path_arg.as_str()])
        .map_err(|e| Error::UpdateKeys {
            path: enc_file.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok(())
}

/// Whether the encrypted twin is missing, empty, or decrypts to different
/// content than the source. An unreadable or undecryptable twin counts as
/// changed, so a broken file gets re-encrypted rather than trusted.
fn needs_encryption<R: CommandRunner>(runner: &R, source: &str, enc_file: &Path) -> bool {
    let Ok(metadata) = std::fs::metadata(enc_file) else {
        return true;
    };
    if metadata.len() == 0 {
        return true;
    }

    let path_arg = enc_file.display().to_string();
    match runner.run(constants::SOPS_TOOL, &["-d", path_arg.as_str()]) {
        Ok(current) => content_hash(source) != content_hash(&current),
        Err(_) => true,
    }
}

fn content_hash(content: &str) -> [u8; 32] {
    Sha256::digest(content.as_bytes()).into()
}

/// Path of the companion document: same location, swapped suffix.
fn twin(path: &Path, from: &str, to: &str) -> PathBuf {
    match path.file_name() {
        Some(name) => {
            let name = name.to_string_lossy();
            path.with_file_name(format!("{}{}", name.trim_end_matches(from), to))
        }
        None => path.to_path_buf(),
    }
}

/// Files under `base` whose name ends with `suffix`, sorted for
/// deterministic processing order.
fn find_documents(base: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in walkdir::WalkDir::new(base) {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.ends_with(suffix) {
            found.push(entry.into_path());
        }
    }
    found.sort();
    Ok(found)
}
