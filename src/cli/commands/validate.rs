//! Validate config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Feed: {}", config.feed.categories_url);
        println!("  Import API: {}", config.import.base_url);
        println!("  Languages: {:?}", config.sync.languages);
        println!("  Attributes: {}", config.sync.attributes.len());
        println!("  Container Prefix: {}", config.import.container_prefix);
        println!("  Page Size: {}", config.feed.page_size);
        println!("  Cursor Path: {}", config.state.cursor_path);

        Ok(0)
    }
}
