//! Sync command implementation
//!
//! Runs one full catalog sync: fetch, merge, and dispatch all three entity
//! kinds, then advance the cursor on success.

use crate::config::load_config;
use crate::core::sync::{StageOutcome, SyncCoordinator, SyncSummary};
use crate::domain::SyncError;
use chrono::{DateTime, Utc};
use clap::Args;
use tokio::sync::watch;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Fetch changes since this RFC 3339 instant instead of the persisted
    /// cursor (the cursor is still advanced on success)
    #[arg(long)]
    pub since: Option<String>,

    /// Dry run mode - fetch and merge, but don't submit to the import API
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    /// Execute the sync command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting sync command");

        let mut config = load_config(config_path)?;
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        let since_override = match self.since.as_deref() {
            Some(raw) => match DateTime::parse_from_rfc3339(raw) {
                Ok(ts) => Some(ts.with_timezone(&Utc)),
                Err(e) => {
                    eprintln!("Invalid --since value '{raw}': {e}");
                    return Ok(2);
                }
            },
            None => None,
        };

        if config.application.dry_run {
            println!("DRY RUN MODE - nothing will be submitted to the import API");
            println!();
        }

        let coordinator = match SyncCoordinator::new(config) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create sync coordinator");
                eprintln!("Failed to initialize sync: {e}");
                return Ok(4);
            }
        };

        match coordinator.run(since_override, &shutdown_signal).await {
            Ok(summary) => {
                print_summary(&summary);
                Ok(if summary.is_success() { 0 } else { 1 })
            }
            Err(SyncError::Cancelled) => {
                println!("Sync cancelled.");
                Ok(1)
            }
            Err(e) => {
                tracing::error!(error = %e, "Sync failed");
                eprintln!("Sync failed: {e}");
                Ok(5)
            }
        }
    }
}

pub(crate) fn print_summary(summary: &SyncSummary) {
    println!();
    println!("Sync Summary:");
    println!("  Since: {}", summary.since.to_rfc3339());
    for report in &summary.stages {
        match &report.outcome {
            StageOutcome::Completed { documents } => {
                println!("  {}: {} document(s) imported", report.stage, documents);
            }
            StageOutcome::Skipped => println!("  {}: skipped", report.stage),
            StageOutcome::Failed(message) => println!("  {}: FAILED - {message}", report.stage),
        }
    }
    println!(
        "  Duration: {:.2}s",
        summary.duration().num_milliseconds() as f64 / 1000.0
    );
    println!(
        "  Cursor: {}",
        if summary.cursor_advanced {
            "advanced"
        } else {
            "unchanged"
        }
    );
    println!();
}
