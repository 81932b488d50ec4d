//! Foxhole - SOPS-backed secrets resolution for environment-scoped deployments.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── get           # Fetch a single secret by dot-path
//! │   ├── export        # Flattened env-var export (.env / json / file)
//! │   ├── check         # Load + validate against the required schema
//! │   ├── crypt         # Batch encrypt/decrypt/updatekeys via sops
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── document      # Nested YAML document, dot-path lookup, flattening
//!     ├── schema        # Required-secret schema + default document
//!     ├── resolver      # Decrypt-or-fallback pipeline with memoization
//!     ├── runner        # CommandRunner abstraction over sops/which
//!     ├── store         # Conventional secrets/<env>/ file layout
//!     ├── environment   # Environment selection + CI detection
//!     ├── envfile       # .env-style output with quoting and 0600 writes
//!     └── sops          # Batch encrypt/decrypt/updatekeys tooling
//! ```
//!
//! # Features
//!
//! - Decrypts per-environment secrets with the sops CLI, falling back to
//!   plaintext documents where sops is unavailable or the file is unencrypted
//! - Validates every loaded document against a fixed required-path schema
//! - Flattens nested documents into `UPPER_SNAKE_CASE` env-var mappings
//! - One-shot memoization per resolver instance

pub mod cli;
pub mod core;
pub mod error;
