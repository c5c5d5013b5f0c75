//! Core domain types: errors, source records, validation rules.

pub mod errors;
pub mod records;
pub mod validate;

pub use errors::{FeedError, ImportError, SyncError};
pub use records::{CategoryRecord, ImageRef, SourceRecord, VariantRecord};
pub use validate::{validate_all, Validate};

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SyncError>;
