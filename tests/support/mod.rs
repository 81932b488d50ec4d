//! Test support utilities for foxhole integration tests.
//!
//! Provides an isolated secrets tree per test and helper commands.

#![allow(dead_code)]

pub mod assertions;

#[allow(unused_imports)]
pub use assertions::*;

use std::path::PathBuf;

use tempfile::TempDir;

/// A complete document satisfying the required-secret schema, with a few
/// extra leaves for lookup and flattening tests.
pub const VALID_DOC: &str = "app:\n  environment: dev\n  secret_key: sk-123\naws:\n  account_id: \"123456789012\"\n  region: us-east-1\ndatabase:\n  password: hunter2\n  port: 5432\n";

/// A document that parses cleanly but omits a required path.
pub const INCOMPLETE_DOC: &str =
    "app:\n  environment: dev\naws:\n  account_id: \"123456789012\"\n  region: us-east-1\ndatabase:\n  password: hunter2\n";

/// Test environment with an isolated secrets tree.
///
/// Each test gets its own temporary project dir. No process-global state is
/// mutated: child processes use `.current_dir()` and a scrubbed
/// environment, so tests can safely run in parallel.
pub struct Test {
    /// Temporary directory acting as the project root
    pub dir: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Create a test environment with a plaintext document for `env`.
    pub fn with_plaintext(env: &str, content: &str) -> Self {
        let t = Self::new();
        t.write_plaintext(env, content);
        t
    }

    /// Write a plaintext fallback document for an environment.
    pub fn write_plaintext(&self, env: &str, content: &str) -> PathBuf {
        let dir = self.dir.path().join("secrets").join(env);
        std::fs::create_dir_all(&dir).expect("failed to create secrets dir");
        let path = dir.join("secrets.dec.yaml");
        std::fs::write(&path, content).expect("failed to write plaintext document");
        path
    }

    /// The secrets base directory inside the test project.
    pub fn secrets_dir(&self) -> PathBuf {
        self.dir.path().join("secrets")
    }

    /// Create a foxhole command with a scrubbed environment.
    ///
    /// Returns a Command configured with:
    /// - current directory set to the test project root
    /// - PATH pointing at an empty directory so `sops` is never found
    /// - environment-selection and CI variables removed
    pub fn cmd(&self) -> assert_cmd::Command {
        #[allow(deprecated)]
        let mut cmd =
            assert_cmd::Command::cargo_bin("foxhole").expect("failed to find foxhole binary");
        cmd.current_dir(self.dir.path());
        cmd.env("PATH", self.dir.path());
        for var in ["DEPLOY_ENV", "ENVIRONMENT", "CI", "GITHUB_ACTIONS", "JENKINS_URL"] {
            cmd.env_remove(var);
        }
        cmd
    }
}

impl Default for Test {
    fn default() -> Self {
        Self::new()
    }
}
