//! Configuration schema types
//!
//! Root structure mapping to the TOML configuration file, with validation
//! applied at load time.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Main catsync configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct CatsyncConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Source feed configuration
    pub feed: FeedConfig,

    /// Import API configuration
    pub import: ImportConfig,

    /// Sync behavior: languages, attribute schema, scheduling
    pub sync: SyncSettings,

    /// Cursor state configuration
    #[serde(default)]
    pub state: StateConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CatsyncConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.feed.validate()?;
        self.import.validate()?;
        self.sync.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (fetch and merge, but don't submit to the import API)
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Source feed configuration
///
/// The feed exposes one paginated endpoint per entity kind and a token
/// endpoint for client-credentials bearer tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Token endpoint for the client-credentials exchange
    pub token_url: String,

    /// Client id for token acquisition
    pub client_id: String,

    /// Client secret for token acquisition
    pub client_secret: SecretString,

    /// Categories endpoint
    pub categories_url: String,

    /// Products (variants) endpoint
    pub products_url: String,

    /// Page size requested via the `top` query parameter
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl FeedConfig {
    fn validate(&self) -> Result<(), String> {
        for (name, url) in [
            ("feed.token_url", &self.token_url),
            ("feed.categories_url", &self.categories_url),
            ("feed.products_url", &self.products_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!("{name} must start with http:// or https://"));
            }
        }
        if self.client_id.is_empty() {
            return Err("feed.client_id cannot be empty".to_string());
        }
        if self.page_size == 0 {
            return Err("feed.page_size must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Import API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    /// Base URL of the import API
    pub base_url: String,

    /// Bearer token for the import API (token acquisition is handled
    /// outside of catsync)
    pub access_token: SecretString,

    /// Prefix of deterministic container names:
    /// `<prefix>-<entity-kind>-<batchIndex>`
    #[serde(default = "default_container_prefix")]
    pub container_prefix: String,

    /// Maximum number of documents per import container (logical batch size)
    #[serde(default = "default_container_entries_limit")]
    pub container_entries_limit: usize,

    /// Key of the product type every imported product references
    pub product_type: String,

    /// Default publish flag for products without an explicit override
    #[serde(default)]
    pub publish_products: bool,

    /// Default publish flag for variants without an explicit override
    #[serde(default)]
    pub publish_product_variants: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl ImportConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("import.base_url must start with http:// or https://".to_string());
        }
        if self.container_prefix.is_empty() {
            return Err("import.container_prefix cannot be empty".to_string());
        }
        if self.container_entries_limit == 0 {
            return Err("import.container_entries_limit must be greater than 0".to_string());
        }
        if self.product_type.is_empty() {
            return Err("import.product_type cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Sync behavior settings
#[derive(Debug, Clone, Deserialize)]
pub struct SyncSettings {
    /// Languages fetched from the feed; localized fields are merged across
    /// all of them
    pub languages: Vec<String>,

    /// Attribute schema in declared order; projection iterates this order
    #[serde(default)]
    pub attributes: Vec<AttributeSpec>,

    /// Interval of the `schedule` command in seconds
    #[serde(default = "default_schedule_interval")]
    pub schedule_interval_seconds: u64,
}

impl SyncSettings {
    fn validate(&self) -> Result<(), String> {
        if self.languages.is_empty() {
            return Err("sync.languages cannot be empty".to_string());
        }
        if self.languages.iter().any(|l| l.trim().is_empty()) {
            return Err("sync.languages entries cannot be blank".to_string());
        }
        let mut seen = std::collections::HashSet::new();
        for spec in &self.attributes {
            if spec.name.trim().is_empty() {
                return Err("sync.attributes entries must have a name".to_string());
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(format!("duplicate attribute '{}' in sync.attributes", spec.name));
            }
        }
        Ok(())
    }
}

/// One schema entry: attribute name and its declared type.
#[derive(Debug, Clone, Deserialize)]
pub struct AttributeSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
}

/// Declared attribute types the projector knows how to parse.
///
/// The set is closed; projection matches exhaustively, so adding a variant
/// forces every parse site to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    Boolean,
    Text,
    LocalizedText,
    Number,
    DateTime,
    Date,
    Time,
    EnumList,
    LocalizedList,
}

/// Cursor state configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StateConfig {
    /// Path of the persisted last-run-time record
    #[serde(default = "default_cursor_path")]
    pub cursor_path: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            cursor_path: default_cursor_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Enable rolling file output in addition to the console
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for rolling log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy: "daily" or "hourly"
    #[serde(default = "default_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if !["daily", "hourly"].contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be 'daily' or 'hourly'",
                self.local_rotation
            ));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_page_size() -> usize {
    100
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_container_prefix() -> String {
    "catsync".to_string()
}

fn default_container_entries_limit() -> usize {
    200_000
}

fn default_schedule_interval() -> u64 {
    3_600
}

fn default_cursor_path() -> String {
    "catsync-cursor.json".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}
