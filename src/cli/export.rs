//! Export command.
//!
//! Flattens the environment's secrets into `UPPER_SNAKE_CASE` variables and
//! renders them as .env lines, a JSON object, or a 0600-permission file.

use std::path::PathBuf;

use tracing::info;

use crate::cli::output;
use crate::core::envfile::EnvFile;
use crate::core::resolver::Resolver;
use crate::core::runner::CommandRunner;
use crate::error::Result;

/// Export flattened secrets.
pub fn execute<R: CommandRunner>(
    mut resolver: Resolver<R>,
    file: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let vars = resolver.export_env()?;
    info!(
        environment = resolver.environment(),
        count = vars.len(),
        "exporting secrets"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&vars)?);
        return Ok(());
    }

    let envfile = EnvFile::from_map(vars);
    match file {
        Some(path) => {
            envfile.save(&path)?;
            output::success(&format!(
                "wrote {} variables to {}",
                envfile.len(),
                path.display()
            ));
        }
        None => print!("{envfile}"),
    }

    Ok(())
}
