//! Batch sops commands.
//!
//! Thin wrappers over the core batch operations, reporting counts in the
//! shared output style.

use crate::cli::output;
use crate::core::runner::SystemRunner;
use crate::core::sops;
use crate::core::store::DocumentStore;
use crate::error::Result;

/// Encrypt all plaintext documents under the secrets directory.
pub fn encrypt(store: &DocumentStore, update_keys: bool) -> Result<()> {
    let count = sops::encrypt_all(&SystemRunner, store.base(), update_keys)?;
    report(count, "encrypted");
    Ok(())
}

/// Decrypt all encrypted documents under the secrets directory.
pub fn decrypt(store: &DocumentStore) -> Result<()> {
    let count = sops::decrypt_all(&SystemRunner, store.base())?;
    report(count, "decrypted");
    Ok(())
}

/// Refresh recipient keys on all encrypted documents.
pub fn update_keys(store: &DocumentStore) -> Result<()> {
    let count = sops::update_keys_all(&SystemRunner, store.base())?;
    report(count, "updated");
    Ok(())
}

fn report(count: usize, verb: &str) {
    if count == 0 {
        output::warn(&format!("no files {verb}"));
    } else {
        output::success(&format!(
            "{count} file{} {verb}",
            if count == 1 { "" } else { "s" }
        ));
    }
}
