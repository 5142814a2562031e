use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use stockyard_cli::{Script, replay};
use stockyard_infra::{InMemoryInventoryStore, InventoryConfig, InventoryService};
use stockyard_observability::LogFormat;

#[derive(Parser)]
#[command(name = "stockyard")]
#[command(about = "Multi-warehouse stock ledger", long_about = None)]
struct Cli {
    /// Log format (json | pretty); defaults to STOCKYARD_LOG_FORMAT, then json
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON script against a fresh in-memory store, printing one JSON line per step.
    Run {
        /// Path to the script file
        script: PathBuf,

        /// Capacity of warehouses created on demand (overrides the environment)
        #[arg(long)]
        default_capacity: Option<i64>,
    },

    /// Print the effective configuration as JSON.
    Config {
        #[arg(long)]
        default_capacity: Option<i64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = match cli.log_format.as_deref() {
        Some(name) => match LogFormat::parse(name) {
            Some(format) => format,
            None => bail!("unknown log format '{name}' (expected json or pretty)"),
        },
        None => LogFormat::from_env(),
    };
    stockyard_observability::init(format);

    match cli.cmd {
        Commands::Run {
            script,
            default_capacity,
        } => {
            let config = load_config(default_capacity)?;
            let raw = fs::read_to_string(&script)
                .with_context(|| format!("failed to read script {}", script.display()))?;
            let script: Script = serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse script {}", script.display()))?;

            let service = InventoryService::new(Arc::new(InMemoryInventoryStore::new()), &config)
                .context("failed to build inventory service")?;

            let outcomes = replay(&service, &script);
            for outcome in &outcomes {
                println!("{}", serde_json::to_string(outcome)?);
            }

            let failed = outcomes.iter().filter(|o| o.is_error()).count();
            tracing::info!(steps = outcomes.len(), failed, "script replayed");
            if failed > 0 {
                std::process::exit(1);
            }
        }
        Commands::Config { default_capacity } => {
            let config = load_config(default_capacity)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn load_config(default_capacity: Option<i64>) -> Result<InventoryConfig> {
    let config = match default_capacity {
        Some(capacity) => InventoryConfig::with_default_capacity(capacity)?,
        None => InventoryConfig::from_env()?,
    };
    Ok(config)
}
