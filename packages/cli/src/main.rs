#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the fire map toolchain.
//!
//! Runs the fetch → clean → join → aggregate cycle from the terminal,
//! lists the configured data sources, or starts the API server.

mod pipeline;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fire_map_cli", about = "Vegetation fire data toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, clean, and aggregate incidents, printing the results
    Sync {
        /// Only fetch incidents from this department
        #[arg(long)]
        department: Option<String>,
        /// Only fetch incidents reported on or after this date (ISO 8601)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Only fetch incidents reported on or before this date (ISO 8601)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Maximum number of records to fetch (for testing)
        #[arg(long)]
        limit: Option<u64>,
        /// Number of municipality rows to print
        #[arg(long, default_value = "15")]
        top: usize,
    },
    /// List all configured data sources
    Sources,
    /// Start the API server
    Serve,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();

    match cli.command {
        Commands::Sync {
            department,
            from,
            to,
            limit,
            top,
        } => {
            let options = fire_map_source::FetchOptions {
                department,
                date_from: from,
                date_to: to,
                limit,
            };
            pipeline::run_sync(&options, top).await?;
        }
        Commands::Sources => pipeline::list_sources(),
        Commands::Serve => {
            // The server uses actix-web's runtime, so run it in a
            // blocking task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(|| {
                actix_web::rt::System::new().block_on(fire_map_server::run_server())
            })
            .await??;
        }
    }

    Ok(())
}
