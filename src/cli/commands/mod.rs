//! CLI command implementations

pub mod schedule;
pub mod sync;
pub mod validate;
