//! Configuration management: TOML schema, loader, secret handling.

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, AttributeSpec, AttributeType, CatsyncConfig, FeedConfig, ImportConfig,
    LoggingConfig, StateConfig, SyncSettings,
};
pub use secret::{secret_string, SecretString, SecretValue};
