//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with
//! --test-threads=1 to avoid interference between tests.

use catsync::config::{load_config, AttributeType};
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    std::env::remove_var("CATSYNC_APPLICATION_LOG_LEVEL");
    std::env::remove_var("CATSYNC_FEED_PAGE_SIZE");
    std::env::remove_var("CATSYNC_IMPORT_CONTAINER_PREFIX");
    std::env::remove_var("TEST_FEED_CLIENT_SECRET");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "debug"
dry_run = true

[feed]
token_url = "https://feed.example.com/token"
client_id = "client"
client_secret = "secret"
categories_url = "https://feed.example.com/categories"
products_url = "https://feed.example.com/products"
page_size = 250
timeout_seconds = 60

[import]
base_url = "https://import.example.com"
access_token = "import-token"
container_prefix = "acme"
container_entries_limit = 100000
product_type = "catalog"
publish_products = true

[sync]
languages = ["en", "sv", "de"]
schedule_interval_seconds = 900

[[sync.attributes]]
name = "color"
type = "text"

[[sync.attributes]]
name = "careInstructions"
type = "localized_text"

[state]
cursor_path = "/tmp/catsync-cursor.json"

[logging]
local_enabled = true
local_path = "/tmp/catsync-logs"
local_rotation = "hourly"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.dry_run);
    assert_eq!(config.feed.page_size, 250);
    assert_eq!(config.feed.timeout_seconds, 60);
    assert_eq!(config.import.container_prefix, "acme");
    assert_eq!(config.import.container_entries_limit, 100_000);
    assert!(config.import.publish_products);
    assert_eq!(config.sync.languages, vec!["en", "sv", "de"]);
    assert_eq!(config.sync.schedule_interval_seconds, 900);
    assert_eq!(config.sync.attributes.len(), 2);
    assert_eq!(
        config.sync.attributes[1].attribute_type,
        AttributeType::LocalizedText
    );
    assert_eq!(config.state.cursor_path, "/tmp/catsync-cursor.json");
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_FEED_CLIENT_SECRET", "from-env");

    let toml_content = r#"
[feed]
token_url = "https://feed.example.com/token"
client_id = "client"
client_secret = "${TEST_FEED_CLIENT_SECRET}"
categories_url = "https://feed.example.com/categories"
products_url = "https://feed.example.com/products"

[import]
base_url = "https://import.example.com"
access_token = "token"
product_type = "catalog"

[sync]
languages = ["en"]
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");
    assert_eq!(
        config.feed.client_secret.expose_secret().as_ref(),
        "from-env"
    );

    cleanup_env_vars();
}

#[test]
fn test_env_overrides_take_precedence() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("CATSYNC_FEED_PAGE_SIZE", "42");
    std::env::set_var("CATSYNC_IMPORT_CONTAINER_PREFIX", "override");

    let toml_content = r#"
[feed]
token_url = "https://feed.example.com/token"
client_id = "client"
client_secret = "secret"
categories_url = "https://feed.example.com/categories"
products_url = "https://feed.example.com/products"
page_size = 100

[import]
base_url = "https://import.example.com"
access_token = "token"
container_prefix = "catsync"
product_type = "catalog"

[sync]
languages = ["en"]
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");
    assert_eq!(config.feed.page_size, 42);
    assert_eq!(config.import.container_prefix, "override");

    cleanup_env_vars();
}

#[test]
fn test_invalid_config_rejected_at_load() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[feed]
token_url = "not-a-url"
client_id = "client"
client_secret = "secret"
categories_url = "https://feed.example.com/categories"
products_url = "https://feed.example.com/products"

[import]
base_url = "https://import.example.com"
access_token = "token"
product_type = "catalog"

[sync]
languages = ["en"]
"#;

    let temp_file = write_config(toml_content);
    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("token_url"));
}

#[test]
fn test_secret_not_exposed_in_debug() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[feed]
token_url = "https://feed.example.com/token"
client_id = "client"
client_secret = "super-secret-value"
categories_url = "https://feed.example.com/categories"
products_url = "https://feed.example.com/products"

[import]
base_url = "https://import.example.com"
access_token = "another-secret"
product_type = "catalog"

[sync]
languages = ["en"]
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    let debug_output = format!("{config:?}");
    assert!(!debug_output.contains("super-secret-value"));
    assert!(!debug_output.contains("another-secret"));
}
