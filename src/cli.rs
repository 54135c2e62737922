//! CLI interface for daylog: command parsing, argument validation and the
//! async entrypoint used by both `main` and integration tests.
//!
//! All core business logic (contract types, file resolution, the publish
//! pipeline) lives in the `daylog-core` crate. This module is strictly for
//! CLI glue, environment resolution and orchestration:
//! - Entry struct [`Cli`] defines the user-facing options and subcommands.
//! - [`run`] is the async entrypoint for programmatic invocation and
//!   integration testing.
//! - Logging, tracing, and structured error output at CLI level.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use daylog_core::contract::LogRecord;
use daylog_core::logfile::{read_log, resolve_log_file};
use daylog_core::publish::publish_log;

use crate::load_config::resolve_env;
use crate::upload::HubClient;

/// CLI for daylog: publish a member's daily log to the team hub repository.
#[derive(Parser)]
#[clap(
    name = "daylog",
    version,
    about = "Publish the daily member log to the team hub repository"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload today's log file (or the most recent one) to the hub
    Push {
        /// Directory holding the log files; defaults to the current directory
        #[clap(long)]
        dir: Option<PathBuf>,
        /// Publish under this date instead of today (YYYY-MM-DD)
        #[clap(long)]
        date: Option<NaiveDate>,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Push { dir, date } => {
            let env = resolve_env();
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            println!("Member: {}", env.member_id);
            println!("Team directory: {}", env.team_dir);

            // Credential precondition: fails here, before any file or
            // network access, when the PAT is absent or blank.
            let store = HubClient::new_from_env(env.hub.clone())
                .map_err(|e| anyhow::Error::msg(e.to_string()))?;

            let base_dir = match dir {
                Some(dir) => dir,
                None => {
                    std::env::current_dir().context("Failed to determine current directory")?
                }
            };
            let local_file = resolve_log_file(&base_dir, date)
                .context("Failed to resolve local log file")?;
            println!("Using log file: {}", local_file.display());

            let content = read_log(&local_file)
                .with_context(|| format!("Failed to read {}", local_file.display()))?;

            let record = LogRecord {
                member_id: env.member_id.clone(),
                team_dir: env.team_dir.clone(),
                date,
                content,
            };
            tracing::info!(command = "push", "Starting publish process");
            match publish_log(&env.hub, &store, &record).await {
                Ok(report) => {
                    tracing::info!(command = "push", ?report, "Publish complete");
                    println!(
                        "Uploaded {}_log.md ({})",
                        date.format("%Y-%m-%d"),
                        if report.created { "created" } else { "updated" }
                    );
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "push", error = %e, "Publish failed");
                    Err(anyhow::Error::msg(e))
                }
            }
        }
    }
}
