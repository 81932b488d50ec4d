//! Check command.
//!
//! Runs the full load pipeline (decrypt or fallback, parse, schema
//! validation) and reports the outcome.

use crate::cli::output;
use crate::core::resolver::Resolver;
use crate::core::runner::CommandRunner;
use crate::core::schema;
use crate::error::Result;

/// Validate the environment's secrets document.
pub fn execute<R: CommandRunner>(mut resolver: Resolver<R>) -> Result<()> {
    let document = resolver.load()?;
    let leaves = document.flatten().len();

    output::success(&format!(
        "secrets for environment {} are valid ({} required paths, {} string leaves)",
        resolver.environment(),
        schema::REQUIRED_SECRETS.len(),
        leaves
    ));
    Ok(())
}
