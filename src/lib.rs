// catsync - Catalog Feed to Import API Sync Tool
// Copyright (c) 2025 catsync Contributors
// Licensed under the MIT License

//! # catsync - catalog feed to import API sync
//!
//! catsync incrementally synchronizes a paginated product-information feed
//! into a staged bulk-import API: categories, products, and product
//! variants.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Fetching** per-language records from a cursor-paginated feed
//! - **Merging** language-specific records into localized import documents
//! - **Projecting** raw attribute strings into typed values via a
//!   configured schema
//! - **Dispatching** documents in batches to deterministic import
//!   containers
//! - **Tracking** the last successful run for incremental syncs
//!
//! ## Architecture
//!
//! catsync follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (merge, attributes, dispatch, state, sync)
//! - [`adapters`] - External integrations (source feed, import API)
//! - [`domain`] - Core domain types and validation
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use catsync::config::load_config;
//! use catsync::core::sync::SyncCoordinator;
//! use tokio::sync::watch;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("catsync.toml")?;
//!     let coordinator = SyncCoordinator::new(config)?;
//!
//!     let (_cancel_tx, cancel_rx) = watch::channel(false);
//!     let summary = coordinator.run(None, &cancel_rx).await?;
//!
//!     println!("Sync success: {}", summary.is_success());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
