//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CatsyncConfig;
use crate::domain::{Result, SyncError};
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CatsyncConfig
/// 4. Applies environment variable overrides (CATSYNC_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, TOML parsing fails, a
/// referenced environment variable is missing, or validation fails.
pub fn load_config(path: impl AsRef<Path>) -> Result<CatsyncConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SyncError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SyncError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: CatsyncConfig = toml::from_str(&contents)
        .map_err(|e| SyncError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config
        .validate()
        .map_err(|e| SyncError::Configuration(format!("Configuration validation failed: {e}")))?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. Returns an error naming every
/// referenced variable that is not set.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(SyncError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the CATSYNC_* prefix
///
/// Variables follow the pattern CATSYNC_<SECTION>_<KEY>, for example
/// CATSYNC_FEED_CLIENT_ID or CATSYNC_IMPORT_BASE_URL.
fn apply_env_overrides(config: &mut CatsyncConfig) {
    use crate::config::secret::secret_string;

    if let Ok(val) = std::env::var("CATSYNC_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("CATSYNC_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    if let Ok(val) = std::env::var("CATSYNC_FEED_TOKEN_URL") {
        config.feed.token_url = val;
    }
    if let Ok(val) = std::env::var("CATSYNC_FEED_CLIENT_ID") {
        config.feed.client_id = val;
    }
    if let Ok(val) = std::env::var("CATSYNC_FEED_CLIENT_SECRET") {
        config.feed.client_secret = secret_string(val);
    }
    if let Ok(val) = std::env::var("CATSYNC_FEED_PAGE_SIZE") {
        if let Ok(size) = val.parse() {
            config.feed.page_size = size;
        }
    }

    if let Ok(val) = std::env::var("CATSYNC_IMPORT_BASE_URL") {
        config.import.base_url = val;
    }
    if let Ok(val) = std::env::var("CATSYNC_IMPORT_ACCESS_TOKEN") {
        config.import.access_token = secret_string(val);
    }
    if let Ok(val) = std::env::var("CATSYNC_IMPORT_CONTAINER_PREFIX") {
        config.import.container_prefix = val;
    }
    if let Ok(val) = std::env::var("CATSYNC_IMPORT_CONTAINER_ENTRIES_LIMIT") {
        if let Ok(limit) = val.parse() {
            config.import.container_entries_limit = limit;
        }
    }

    if let Ok(val) = std::env::var("CATSYNC_STATE_CURSOR_PATH") {
        config.state.cursor_path = val;
    }

    if let Ok(val) = std::env::var("CATSYNC_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CATSYNC_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
