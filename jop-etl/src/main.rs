//! jop-etl - Build the episode database from the raw data files

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use jop_common::config::TomlConfig;
use jop_common::db::init_database;
use jop_etl::cli::Args;
use jop_etl::load::{prepare, run_full_etl};
use jop_etl::{CollectionCounts, EtlError};
use tracing::{error, info};

fn init_tracing(config: &TomlConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();
}

fn print_summary(counts: &CollectionCounts) {
    println!("Data summary:");
    println!("   Episodes: {}", counts.episodes);
    println!("   Colors:   {}", counts.colors);
    println!("   Subjects: {}", counts.subjects);
}

async fn run(args: &Args, config: &TomlConfig) -> Result<CollectionCounts> {
    let files = config.data_files();

    if args.dry_run {
        let data = prepare(&files)?;
        return Ok(CollectionCounts {
            episodes: data.episodes.len() as i64,
            colors: data.colors.len() as i64,
            subjects: data.subjects.len() as i64,
        });
    }

    let pool = init_database(&config.database_path)
        .await
        .with_context(|| format!("Failed to open {}", config.database_path.display()))?;
    let counts = run_full_etl(&pool, &files).await?;
    pool.close().await;

    Ok(counts)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let config = args.resolve_config();
    init_tracing(&config);

    info!(
        "Starting Joy of Painting ETL (jop-etl) v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!("Data directory: {}", config.data_dir.display());
    info!("Database: {}", config.database_path.display());

    match run(&args, &config).await {
        Ok(counts) if counts.is_empty() => {
            error!("ETL completed but no episodes were loaded");
            ExitCode::FAILURE
        }
        Ok(counts) => {
            if args.dry_run {
                println!("Dry run complete (database not modified)");
            } else {
                println!("ETL process completed successfully");
            }
            print_summary(&counts);
            ExitCode::SUCCESS
        }
        Err(e) => {
            if let Some(EtlError::MissingInputs(names)) = e.downcast_ref::<EtlError>() {
                eprintln!("Missing required data files:");
                for name in names {
                    eprintln!("   - {}", name);
                }
                eprintln!("Place them in {}", config.data_dir.display());
            } else {
                error!("ETL process failed: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}
