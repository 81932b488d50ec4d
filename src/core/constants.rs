//! Constants used throughout foxhole.
//!
//! Centralizes magic strings and layout conventions.

/// Decryption tool expected on PATH.
pub const SOPS_TOOL: &str = "sops";

/// Default directory holding per-environment secrets.
pub const SECRETS_DIR: &str = "secrets";

/// Encrypted document file name inside an environment directory.
pub const ENCRYPTED_FILE: &str = "secrets.enc.yaml";

/// Plaintext fallback document file name inside an environment directory.
pub const PLAINTEXT_FILE: &str = "secrets.dec.yaml";

/// Suffix marking encrypted documents for batch operations.
pub const ENCRYPTED_SUFFIX: &str = ".enc.yaml";

/// Suffix marking plaintext documents for batch operations.
pub const PLAINTEXT_SUFFIX: &str = ".dec.yaml";

/// Primary runtime-mode variable consulted for environment selection.
pub const DEPLOY_ENV_VAR: &str = "DEPLOY_ENV";

/// Secondary generic environment-name variable.
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

/// Environment used when nothing else is specified.
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Well-known CI indicator variables.
pub const CI_VARS: &[&str] = &["CI", "GITHUB_ACTIONS", "JENKINS_URL"];

/// Log filter variable for the CLI.
pub const LOG_ENV: &str = "FOXHOLE_LOG";
