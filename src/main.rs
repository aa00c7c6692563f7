use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use bounty_targets::config::Config;

mod cli;

use cli::OutputFormat;

#[derive(Parser)]
#[command(name = "bounty-targets")]
#[command(about = "Fetch and normalize HackerOne program scopes")]
#[command(version)]
struct Cli {
    /// Working directory used to look up bounty-targets.toml (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    /// Path to the config file (defaults to bounty-targets.toml, then ~/.bounty-targets/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// GraphQL endpoint (overrides the config file)
    #[arg(short, long, global = true)]
    endpoint: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan all programs and write their normalized scopes
    Scan {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// List in-scope URLs across all programs, one per line
    Uris {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let work_dir = cli.path.unwrap_or_else(|| PathBuf::from("."));

    let mut config = Config::load(&work_dir, cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
        config.validate()?;
    }

    match cli.command {
        Some(Commands::Scan { output, format }) => {
            cli::scan::scan_command(&config, output.as_deref(), format)?;
        }
        Some(Commands::Uris { output }) => {
            cli::uris::uris_command(&config, output.as_deref())?;
        }
        None => {
            // Default: dump the full result set
            cli::scan::scan_command(&config, None, OutputFormat::default())?;
        }
    }

    Ok(())
}
