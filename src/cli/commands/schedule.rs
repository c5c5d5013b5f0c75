//! Schedule command implementation
//!
//! Runs the sync in a loop on a fixed interval. A failed run does not stop
//! the loop; the next run retries from the unchanged cursor. The loop ends
//! on the shutdown signal.

use crate::config::load_config;
use crate::core::sync::SyncCoordinator;
use crate::domain::SyncError;
use clap::Args;
use std::time::Duration;
use tokio::sync::watch;

/// Arguments for the schedule command
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// Seconds between run starts (defaults to sync.schedule_interval_seconds)
    #[arg(long)]
    pub interval_seconds: Option<u64>,
}

impl ScheduleArgs {
    /// Execute the schedule command
    pub async fn execute(
        &self,
        config_path: &str,
        mut shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let config = load_config(config_path)?;
        let interval = Duration::from_secs(
            self.interval_seconds
                .unwrap_or(config.sync.schedule_interval_seconds),
        );

        let coordinator = SyncCoordinator::new(config)?;
        tracing::info!(interval_secs = interval.as_secs(), "Starting scheduled sync loop");

        loop {
            if *shutdown_signal.borrow() {
                break;
            }

            match coordinator.run(None, &shutdown_signal).await {
                Ok(summary) => {
                    super::sync::print_summary(&summary);
                }
                Err(SyncError::Cancelled) => {
                    println!("Sync cancelled.");
                    break;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Scheduled run failed, will retry next interval");
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = shutdown_signal.changed() => {
                    if *shutdown_signal.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("Scheduled sync loop stopped");
        Ok(0)
    }
}
