//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for catsync using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// catsync - catalog feed to import API sync tool
#[derive(Parser, Debug)]
#[command(name = "catsync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "catsync.toml", env = "CATSYNC_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CATSYNC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one catalog sync from the feed to the import API
    Sync(commands::sync::SyncArgs),

    /// Run catalog syncs on a fixed interval until interrupted
    Schedule(commands::schedule::ScheduleArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_sync() {
        let cli = Cli::parse_from(["catsync", "sync"]);
        assert_eq!(cli.config, "catsync.toml");
        assert!(matches!(cli.command, Commands::Sync(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["catsync", "--config", "custom.toml", "sync"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_sync_with_since() {
        let cli = Cli::parse_from(["catsync", "sync", "--since", "2024-03-15T00:00:00Z"]);
        match cli.command {
            Commands::Sync(args) => {
                assert_eq!(args.since.as_deref(), Some("2024-03-15T00:00:00Z"));
            }
            _ => panic!("expected sync command"),
        }
    }

    #[test]
    fn test_cli_parse_schedule() {
        let cli = Cli::parse_from(["catsync", "schedule", "--interval-seconds", "600"]);
        match cli.command {
            Commands::Schedule(args) => assert_eq!(args.interval_seconds, Some(600)),
            _ => panic!("expected schedule command"),
        }
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["catsync", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }
}
