//! URIs command implementation

use anyhow::{Context, Result};
use std::path::Path;

use bounty_targets::config::Config;

use super::write_output;

/// Write every in-scope URL, one per line
pub fn uris_command(config: &Config, output: Option<&Path>) -> Result<()> {
    let scanner = config.scanner();
    let uris = scanner
        .uris()
        .with_context(|| format!("Failed to scan programs from {}", config.endpoint))?;

    let mut content = uris.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    write_output(output, &content)?;

    if let Some(path) = output {
        tracing::info!("Wrote {} URLs to {}", uris.len(), path.display());
    }

    Ok(())
}
