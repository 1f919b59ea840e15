use std::path::PathBuf;

use clap::{Parser, Subcommand};
use localseo_citations::ErrorPolicy;
use localseo_nap::NapRecord;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

mod audit;

#[derive(Debug, Parser)]
#[command(name = "localseo")]
#[command(about = "NAP normalization, fuzzy matching and citation audits")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two NAP records and print the match result as JSON
    Compare {
        #[arg(long)]
        source_name: String,
        #[arg(long, default_value = "")]
        source_address: String,
        #[arg(long)]
        source_phone: Option<String>,
        #[arg(long)]
        target_name: String,
        #[arg(long, default_value = "")]
        target_address: String,
        #[arg(long)]
        target_phone: Option<String>,
    },
    /// Print the normalized form of a NAP record as JSON
    Normalize {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Look up every listing in the targets file and score it against the business
    Audit {
        /// Targets YAML; defaults to `LOCALSEO_TARGETS_PATH`
        #[arg(long)]
        targets: Option<PathBuf>,
        /// Keep trying a listing's fallback URLs after a failed fetch
        #[arg(long)]
        suppress_errors: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = localseo_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Compare {
            source_name,
            source_address,
            source_phone,
            target_name,
            target_address,
            target_phone,
        } => {
            let source = NapRecord {
                name: source_name,
                address: source_address,
                phone: source_phone,
            };
            let target = NapRecord {
                name: target_name,
                address: target_address,
                phone: target_phone,
            };
            print_json(&localseo_nap::compare_nap(&source, &target))?;
        }
        Commands::Normalize {
            name,
            address,
            phone,
        } => {
            let record = NapRecord {
                name,
                address,
                phone,
            };
            print_json(&localseo_nap::normalize_nap(&record))?;
        }
        Commands::Audit {
            targets,
            suppress_errors,
        } => {
            let policy = if suppress_errors {
                ErrorPolicy::Suppress
            } else {
                ErrorPolicy::Propagate
            };
            let report = audit::run_audit(&config, targets.as_deref(), policy).await?;
            print_json(&report)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
