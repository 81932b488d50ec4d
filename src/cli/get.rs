//! Get command.
//!
//! Prints a single secret resolved by dot-path.

use crate::core::resolver::Resolver;
use crate::core::runner::CommandRunner;
use crate::error::Result;

/// Print one secret value.
pub fn execute<R: CommandRunner>(mut resolver: Resolver<R>, path: &str) -> Result<()> {
    let value = resolver.get(path)?;
    println!("{value}");
    Ok(())
}
