//! accrue: replay ledger scenarios and inspect snapshots.

use accrue_cli::{run_inspect, run_replay, LedgerConfig};
use accrue_utils::{init_logging, LogFormat};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "accrue", about = "Staking ledger scenario runner")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "ACCRUE_CONFIG")]
    config: Option<PathBuf>,

    /// Ledger admin identity.
    #[arg(long, env = "ACCRUE_ADMIN")]
    admin: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "ACCRUE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "ACCRUE_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Apply a JSON scenario to a fresh ledger and print the final state.
    Replay {
        /// Scenario file.
        scenario: PathBuf,

        /// Write the final ledger snapshot to this path.
        #[arg(long)]
        snapshot_out: Option<PathBuf>,
    },
    /// Verify a snapshot file and print its contents.
    Inspect {
        /// Snapshot file.
        snapshot: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => LedgerConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => LedgerConfig::default(),
    };
    if let Some(admin) = cli.admin {
        config.admin = admin;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    init_logging(config.log_format, &config.log_level);
    if let Some(ref path) = cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    let output = match cli.command {
        Command::Replay {
            scenario,
            snapshot_out,
        } => {
            let report = run_replay(&config, &scenario, snapshot_out.as_deref())
                .with_context(|| format!("replaying {}", scenario.display()))?;
            serde_json::to_string_pretty(&report)?
        }
        Command::Inspect { snapshot } => {
            let summary = run_inspect(&snapshot)
                .with_context(|| format!("inspecting {}", snapshot.display()))?;
            serde_json::to_string_pretty(&summary)?
        }
    };
    println!("{output}");
    Ok(())
}
