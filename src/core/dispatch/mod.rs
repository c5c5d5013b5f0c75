//! Batch dispatch
//!
//! Splits merged import documents into logical batches of at most the
//! configured container limit, resolves one deterministic container per
//! batch, and submits the batch as concurrent sub-batches of at most
//! [`TRANSPORT_BATCH_LIMIT`] documents.
//!
//! A container that cannot be resolved aborts the dispatch; sub-batch
//! submission failures do not. They are collected into the outcome so the
//! caller decides how a partially delivered stage is reported.

use crate::adapters::import_api::{EntityKind, ImportClient};
use crate::config::ImportConfig;
use crate::domain::{Result, SyncError};
use serde::Serialize;
use tokio::sync::watch;

/// Maximum documents per submission request.
pub const TRANSPORT_BATCH_LIMIT: usize = 20;

/// Aggregate result of dispatching one entity kind.
#[derive(Debug)]
pub struct DispatchOutcome {
    /// Containers resolved (one per logical batch).
    pub containers: usize,
    /// Documents delivered across all sub-batches.
    pub submitted: usize,
    /// Sub-batches the import API rejected.
    pub failures: Vec<SubBatchFailure>,
}

impl DispatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Documents that were not delivered.
    pub fn dropped(&self) -> usize {
        self.failures.iter().map(|f| f.documents).sum()
    }
}

/// One rejected sub-batch.
#[derive(Debug)]
pub struct SubBatchFailure {
    pub container_key: String,
    pub sub_batch_index: usize,
    pub documents: usize,
    pub error: SyncError,
}

/// Dispatches merged documents to the import API.
pub struct Dispatcher<'a> {
    import: &'a ImportClient,
    config: &'a ImportConfig,
    dry_run: bool,
}

impl<'a> Dispatcher<'a> {
    pub fn new(import: &'a ImportClient, config: &'a ImportConfig, dry_run: bool) -> Self {
        Self {
            import,
            config,
            dry_run,
        }
    }

    /// Submits all documents of one entity kind.
    ///
    /// Documents are chunked into logical batches of
    /// `container_entries_limit`; batch `i` goes to the container keyed
    /// `<prefix>-<kind>-<i>`, created on demand. Within a batch, sub-batches
    /// of at most [`TRANSPORT_BATCH_LIMIT`] documents are submitted
    /// concurrently and awaited as a group.
    pub async fn submit<T: Serialize + Sync>(
        &self,
        kind: EntityKind,
        documents: &[T],
        cancel: &watch::Receiver<bool>,
    ) -> Result<DispatchOutcome> {
        let mut outcome = DispatchOutcome {
            containers: 0,
            submitted: 0,
            failures: Vec::new(),
        };

        if documents.is_empty() {
            tracing::info!(kind = %kind, "No documents to dispatch");
            return Ok(outcome);
        }

        for (batch_index, batch) in documents.chunks(self.config.container_entries_limit).enumerate()
        {
            if *cancel.borrow() {
                return Err(SyncError::Cancelled);
            }

            let container_key =
                format!("{}-{}-{batch_index}", self.config.container_prefix, kind.slug());

            if self.dry_run {
                tracing::info!(
                    kind = %kind,
                    container = %container_key,
                    documents = batch.len(),
                    "Dry run, skipping submission"
                );
                outcome.containers += 1;
                outcome.submitted += batch.len();
                continue;
            }

            self.import.get_or_create_container(&container_key).await?;
            outcome.containers += 1;

            let submissions = batch
                .chunks(TRANSPORT_BATCH_LIMIT)
                .map(|sub_batch| self.import.submit_sub_batch(kind, &container_key, sub_batch));
            let results = futures::future::join_all(submissions).await;

            for (sub_batch_index, (result, sub_batch)) in results
                .into_iter()
                .zip(batch.chunks(TRANSPORT_BATCH_LIMIT))
                .enumerate()
            {
                match result {
                    Ok(()) => outcome.submitted += sub_batch.len(),
                    Err(error) => {
                        tracing::error!(
                            kind = %kind,
                            container = %container_key,
                            sub_batch = sub_batch_index,
                            documents = sub_batch.len(),
                            error = %error,
                            "Sub-batch submission failed"
                        );
                        outcome.failures.push(SubBatchFailure {
                            container_key: container_key.clone(),
                            sub_batch_index,
                            documents: sub_batch.len(),
                            error,
                        });
                    }
                }
            }

            tracing::info!(
                kind = %kind,
                container = %container_key,
                submitted = outcome.submitted,
                failed_sub_batches = outcome.failures.len(),
                "Dispatched batch"
            );
        }

        Ok(outcome)
    }
}
