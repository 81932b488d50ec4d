//! Foxhole - SOPS-backed secrets resolution for environment-scoped deployments.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use foxhole::cli::{execute, output, Cli};
use foxhole::core::{constants, environment};
use foxhole::error::Error;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("foxhole=debug")
        } else {
            EnvFilter::new("foxhole=warn")
        }
    });

    // Structured JSON logs on CI, compact human output everywhere else
    if environment::is_ci() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().without_time())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).without_time())
            .init();
    }

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::SopsMissing => {
                Some("install sops: https://github.com/getsops/sops/releases".to_string())
            }
            Error::Load { environment, .. } => Some(format!(
                "check secrets/{environment}/secrets.enc.yaml (or the .dec.yaml fallback)"
            )),
            Error::RequiredSecretMissing(path) => Some(format!(
                "add {path} to the environment's secrets document"
            )),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
