//! CLI command implementations

pub mod scan;
pub mod uris;

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::io::Write;
use std::path::Path;

use bounty_targets::ResultSet;

/// Serialization format for scan output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn render(self, results: &ResultSet) -> Result<String> {
        let mut rendered = match self {
            OutputFormat::Json => serde_json::to_string_pretty(results)
                .context("Failed to serialize results as JSON")?,
            OutputFormat::Yaml => {
                serde_yaml::to_string(results).context("Failed to serialize results as YAML")?
            }
        };
        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }
        Ok(rendered)
    }
}

/// Write to `output`, or stdout when no path is given
pub fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write output file: {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .context("Failed to write to stdout")
        }
    }
}
