//! Run reporting types

use chrono::{DateTime, Utc};
use std::fmt;

/// The three import stages of a run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Categories,
    Products,
    ProductVariants,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Categories => write!(f, "Categories"),
            Stage::Products => write!(f, "Products"),
            Stage::ProductVariants => write!(f, "Product variants"),
        }
    }
}

/// How one stage ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// Every document of the stage was delivered.
    Completed { documents: usize },
    /// The stage never ran because an earlier one failed.
    Skipped,
    /// The stage ran and failed; the message names the cause.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct StageReport {
    pub stage: Stage,
    pub outcome: StageOutcome,
}

/// Aggregate report of one sync run.
#[derive(Debug)]
pub struct SyncSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub since: DateTime<Utc>,
    pub stages: Vec<StageReport>,
    /// Whether the cursor was persisted at the end of the run.
    pub cursor_advanced: bool,
}

impl SyncSummary {
    /// True when every stage completed.
    pub fn is_success(&self) -> bool {
        self.stages
            .iter()
            .all(|report| matches!(report.outcome, StageOutcome::Completed { .. }))
    }

    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// Failure messages of the stages that did not complete.
    pub fn failure_messages(&self) -> Vec<&str> {
        self.stages
            .iter()
            .filter_map(|report| match &report.outcome {
                StageOutcome::Failed(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}
