//! Import API adapter: staging containers and sub-batch submission.

pub mod client;
pub mod models;

pub use client::ImportClient;
pub use models::{ContainerLookup, EntityKind, ImportContainer, KeyReference};
