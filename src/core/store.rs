//! Document store access.
//!
//! Secrets live in a conventional per-environment layout under a base
//! directory:
//!
//! ```text
//! secrets/
//! └── <environment>/
//!     ├── secrets.enc.yaml   # sops-encrypted document
//!     └── secrets.dec.yaml   # optional plaintext fallback
//! ```

use std::io;
use std::path::{Path, PathBuf};

use crate::core::constants;

/// Locates and reads the on-disk documents for named environments.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    base: PathBuf,
}

impl DocumentStore {
    /// Store rooted at a custom base directory.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Base directory holding the environment subdirectories.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Path of an environment's encrypted document.
    pub fn encrypted_path(&self, environment: &str) -> PathBuf {
        self.base.join(environment).join(constants::ENCRYPTED_FILE)
    }

    /// Path of an environment's plaintext fallback document.
    pub fn plaintext_path(&self, environment: &str) -> PathBuf {
        self.base.join(environment).join(constants::PLAINTEXT_FILE)
    }

    /// Read the plaintext fallback document as text.
    ///
    /// # Errors
    ///
    /// Returns the io error when the file is absent or unreadable.
    pub fn read_plaintext(&self, environment: &str) -> io::Result<String> {
        std::fs::read_to_string(self.plaintext_path(environment))
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new(constants::SECRETS_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_conventional_paths() {
        let store = DocumentStore::new("secrets");
        assert_eq!(
            store.encrypted_path("staging"),
            PathBuf::from("secrets/staging/secrets.enc.yaml")
        );
        assert_eq!(
            store.plaintext_path("staging"),
            PathBuf::from("secrets/staging/secrets.dec.yaml")
        );
    }

    #[test]
    fn test_read_plaintext() {
        let tmp = TempDir::new().unwrap();
        let env_dir = tmp.path().join("dev");
        fs::create_dir_all(&env_dir).unwrap();
        fs::write(env_dir.join("secrets.dec.yaml"), "app:\n  secret_key: sk\n").unwrap();

        let store = DocumentStore::new(tmp.path());
        let text = store.read_plaintext("dev").unwrap();
        assert!(text.contains("secret_key"));
    }

    #[test]
    fn test_read_plaintext_missing() {
        let tmp = TempDir::new().unwrap();
        let store = DocumentStore::new(tmp.path());
        assert!(store.read_plaintext("dev").is_err());
    }
}
