//! Scan command implementation

use anyhow::{Context, Result};
use std::path::Path;

use bounty_targets::config::Config;

use super::{OutputFormat, write_output};

/// Scan every program and write the normalized result set
pub fn scan_command(config: &Config, output: Option<&Path>, format: OutputFormat) -> Result<()> {
    let scanner = config.scanner();
    let results = scanner
        .scan()
        .with_context(|| format!("Failed to scan programs from {}", config.endpoint))?;

    write_output(output, &format.render(results)?)?;

    if let Some(path) = output {
        tracing::info!("Wrote {} programs to {}", results.len(), path.display());
    }

    Ok(())
}
