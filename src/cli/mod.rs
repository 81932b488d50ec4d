//! Command-line interface.

pub mod check;
pub mod completions;
pub mod crypt;
pub mod export;
pub mod get;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::constants;
use crate::core::environment;
use crate::core::resolver::Resolver;
use crate::core::runner::SystemRunner;
use crate::core::store::DocumentStore;
use crate::error::Result;

/// Foxhole - SOPS-backed secrets resolution for deployments.
#[derive(Parser)]
#[command(
    name = "foxhole",
    about = "SOPS-backed secrets resolution for environment-scoped deployments",
    version
)]
pub struct Cli {
    /// Deployment environment (falls back to DEPLOY_ENV, ENVIRONMENT, then "dev")
    #[arg(short, long, global = true)]
    pub environment: Option<String>,

    /// Directory holding per-environment secrets
    #[arg(long, global = true, default_value = constants::SECRETS_DIR)]
    pub secrets_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print a single secret by dot-path (e.g. database.password)
    Get {
        /// Dot-delimited path into the secrets document
        path: String,
    },

    /// Export secrets as flattened environment variables
    Export {
        /// Write to a file (mode 0600) instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Emit a JSON object instead of .env lines
        #[arg(long)]
        json: bool,
    },

    /// Load and validate the environment's secrets document
    Check,

    /// Encrypt all *.dec.yaml documents under the secrets directory
    Encrypt {
        /// Run sops updatekeys after each encryption
        #[arg(long)]
        update_keys: bool,
    },

    /// Decrypt all *.enc.yaml documents under the secrets directory
    Decrypt,

    /// Refresh sops recipient keys on all encrypted documents
    Updatekeys,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Supported completion shells.
#[derive(clap::ValueEnum, Clone, Copy)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Dispatch a parsed command.
pub fn execute(cli: Cli) -> Result<()> {
    let store = DocumentStore::new(&cli.secrets_dir);
    let resolver = || {
        Resolver::with(
            environment::select(cli.environment.as_deref()),
            store.clone(),
            SystemRunner,
        )
    };

    match cli.command {
        Command::Get { path } => get::execute(resolver(), &path),
        Command::Export { output, json } => export::execute(resolver(), output, json),
        Command::Check => check::execute(resolver()),
        Command::Encrypt { update_keys } => crypt::encrypt(&store, update_keys),
        Command::Decrypt => crypt::decrypt(&store),
        Command::Updatekeys => crypt::update_keys(&store),
        Command::Completions { shell } => completions::execute(shell),
    }
}
