//! Environment selection and CI detection.
//!
//! Process environment variables are read through the [`EnvReader`]
//! capability rather than ambient global lookups, so tests supply a fake
//! reader instead of mutating real process state.

use crate::core::constants;

/// Read-only access to environment variables.
pub trait EnvReader {
    /// Value of a variable, if set.
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvReader for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Whether the process is running inside a CI environment.
///
/// True iff any of `CI`, `GITHUB_ACTIONS`, or `JENKINS_URL` is set to a
/// non-empty value.
pub fn is_ci() -> bool {
    is_ci_from(&ProcessEnv)
}

/// [`is_ci`] against an injected reader.
pub fn is_ci_from(reader: &dyn EnvReader) -> bool {
    constants::CI_VARS
        .iter()
        .any(|var| matches!(reader.var(var), Some(value) if !value.is_empty()))
}

/// Resolve the deployment environment name.
///
/// Precedence, first match wins: non-empty explicit argument, `DEPLOY_ENV`,
/// `ENVIRONMENT`, then the literal default `dev`. Never fails and performs
/// no I/O.
pub fn select(explicit: Option<&str>) -> String {
    select_from(explicit, &ProcessEnv)
}

/// [`select`] against an injected reader.
pub fn select_from(explicit: Option<&str>, reader: &dyn EnvReader) -> String {
    if let Some(name) = explicit {
        if !name.is_empty() {
            return name.to_string();
        }
    }

    for var in [constants::DEPLOY_ENV_VAR, constants::ENVIRONMENT_VAR] {
        if let Some(value) = reader.var(var) {
            if !value.is_empty() {
                return value;
            }
        }
    }

    constants::DEFAULT_ENVIRONMENT.to_string()
}
