//! Run orchestration and reporting

pub mod coordinator;
pub mod summary;

pub use coordinator::SyncCoordinator;
pub use summary::{Stage, StageOutcome, StageReport, SyncSummary};
