//! Run state persistence

pub mod cursor;

pub use cursor::{CursorStore, FileCursorStore};
