//! Core pipeline: merging, attribute projection, dispatch, state, and
//! run orchestration.

pub mod attributes;
pub mod dispatch;
pub mod merge;
pub mod state;
pub mod sync;
