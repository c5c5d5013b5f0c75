//! Run orchestration
//!
//! One run executes three stages in a fixed order: categories, products,
//! product variants. Products and variants are derived from a single
//! variant feed fetched once per run. The first stage failure marks the
//! remaining stages as skipped; the cursor is persisted only when every
//! stage completed, so a failed run is retried from the previous cursor.

use crate::adapters::feed::FeedClient;
use crate::adapters::import_api::{EntityKind, ImportClient};
use crate::config::CatsyncConfig;
use crate::core::dispatch::{DispatchOutcome, Dispatcher};
use crate::core::merge::{
    build_variant_imports, ensure_master_variants, merge_categories, merge_products,
};
use crate::core::state::{CursorStore, FileCursorStore};
use crate::core::sync::summary::{Stage, StageOutcome, StageReport, SyncSummary};
use crate::domain::{validate_all, Result, SyncError, VariantRecord};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;

/// Drives one catalog sync run end to end.
pub struct SyncCoordinator {
    config: CatsyncConfig,
    feed: FeedClient,
    import: ImportClient,
    cursor_store: Arc<dyn CursorStore>,
}

impl SyncCoordinator {
    /// Builds a coordinator with a file-backed cursor store from
    /// configuration.
    pub fn new(config: CatsyncConfig) -> Result<Self> {
        let cursor_store = Arc::new(FileCursorStore::new(&config.state.cursor_path));
        Self::with_cursor_store(config, cursor_store)
    }

    pub fn with_cursor_store(
        config: CatsyncConfig,
        cursor_store: Arc<dyn CursorStore>,
    ) -> Result<Self> {
        let feed = FeedClient::new(config.feed.clone())?;
        let import = ImportClient::new(config.import.clone())?;
        Ok(Self {
            config,
            feed,
            import,
            cursor_store,
        })
    }

    /// Runs one full sync.
    ///
    /// `since_override` replaces the persisted cursor for this run only;
    /// without it, the cursor is loaded from the store and an absent cursor
    /// falls back to the Unix epoch. Cancellation surfaces as
    /// [`SyncError::Cancelled`] rather than a failed stage.
    pub async fn run(
        &self,
        since_override: Option<DateTime<Utc>>,
        cancel: &watch::Receiver<bool>,
    ) -> Result<SyncSummary> {
        let started_at = Utc::now();
        let since = match since_override {
            Some(ts) => ts,
            None => self
                .cursor_store
                .load()
                .await?
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        };

        tracing::info!(
            since = %since,
            languages = ?self.config.sync.languages,
            dry_run = self.config.application.dry_run,
            "Starting catalog sync run"
        );

        let mut stages = Vec::new();
        let mut halted = record_stage(
            &mut stages,
            Stage::Categories,
            self.run_categories(since, cancel).await,
        )?;

        if halted {
            stages.push(skipped(Stage::Products));
            stages.push(skipped(Stage::ProductVariants));
        } else {
            match self.fetch_all_variants(since, cancel).await {
                Err(SyncError::Cancelled) => return Err(SyncError::Cancelled),
                Err(error) => {
                    halted = record_stage(&mut stages, Stage::Products, Err(error))?;
                    stages.push(skipped(Stage::ProductVariants));
                }
                Ok(records) => {
                    halted = record_stage(
                        &mut stages,
                        Stage::Products,
                        self.run_products(records.clone(), cancel).await,
                    )?;
                    if halted {
                        stages.push(skipped(Stage::ProductVariants));
                    } else {
                        halted = record_stage(
                            &mut stages,
                            Stage::ProductVariants,
                            self.run_variants(records, cancel).await,
                        )?;
                    }
                }
            }
        }

        let cursor_advanced = !halted && !self.config.application.dry_run;
        if cursor_advanced {
            self.cursor_store.store(started_at).await?;
        }

        let summary = SyncSummary {
            started_at,
            finished_at: Utc::now(),
            since,
            stages,
            cursor_advanced,
        };

        if summary.is_success() {
            tracing::info!(
                duration_ms = summary.duration().num_milliseconds(),
                cursor_advanced = summary.cursor_advanced,
                "Catalog sync run completed"
            );
        } else {
            tracing::warn!(
                duration_ms = summary.duration().num_milliseconds(),
                failures = ?summary.failure_messages(),
                "Catalog sync run finished with failures"
            );
        }

        Ok(summary)
    }

    async fn run_categories(
        &self,
        since: DateTime<Utc>,
        cancel: &watch::Receiver<bool>,
    ) -> Result<StageOutcome> {
        let mut records = Vec::new();
        for language in &self.config.sync.languages {
            records.extend(self.feed.fetch_categories(since, language, cancel).await?);
        }
        validate_all("category", &records)?;

        let imports = merge_categories(records);
        let outcome = self
            .dispatcher()
            .submit(EntityKind::Category, &imports, cancel)
            .await?;
        Ok(stage_outcome(outcome))
    }

    async fn run_products(
        &self,
        records: Vec<VariantRecord>,
        cancel: &watch::Receiver<bool>,
    ) -> Result<StageOutcome> {
        let imports = merge_products(records, &self.config.import);
        let outcome = self
            .dispatcher()
            .submit(EntityKind::Product, &imports, cancel)
            .await?;
        Ok(stage_outcome(outcome))
    }

    async fn run_variants(
        &self,
        records: Vec<VariantRecord>,
        cancel: &watch::Receiver<bool>,
    ) -> Result<StageOutcome> {
        let ensured = ensure_master_variants(records);
        let imports =
            build_variant_imports(ensured, &self.config.sync.attributes, &self.config.import)?;
        let outcome = self
            .dispatcher()
            .submit(EntityKind::ProductVariant, &imports, cancel)
            .await?;
        Ok(stage_outcome(outcome))
    }

    /// Fetches the variant feed once for both derived stages.
    async fn fetch_all_variants(
        &self,
        since: DateTime<Utc>,
        cancel: &watch::Receiver<bool>,
    ) -> Result<Vec<VariantRecord>> {
        let mut records = Vec::new();
        for language in &self.config.sync.languages {
            records.extend(
                self.feed
                    .fetch_variants(since, language, &self.config.sync.attributes, cancel)
                    .await?,
            );
        }
        validate_all("product variant", &records)?;
        Ok(records)
    }

    fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(
            &self.import,
            &self.config.import,
            self.config.application.dry_run,
        )
    }
}

/// Pushes the stage report and returns whether the run must halt.
/// Cancellation is not a stage outcome and aborts the whole run.
fn record_stage(
    stages: &mut Vec<StageReport>,
    stage: Stage,
    result: Result<StageOutcome>,
) -> Result<bool> {
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(SyncError::Cancelled) => return Err(SyncError::Cancelled),
        Err(error) => {
            StageOutcome::Failed(format!("{stage} were not imported successfully: {error}"))
        }
    };

    let halt = matches!(outcome, StageOutcome::Failed(_));
    if let StageOutcome::Failed(message) = &outcome {
        tracing::error!(stage = %stage, message = %message, "Stage failed");
    }
    stages.push(StageReport { stage, outcome });
    Ok(halt)
}

fn stage_outcome(outcome: DispatchOutcome) -> StageOutcome {
    if outcome.is_complete() {
        StageOutcome::Completed {
            documents: outcome.submitted,
        }
    } else {
        StageOutcome::Failed(format!(
            "{} sub-batch(es) rejected, {} document(s) not delivered",
            outcome.failures.len(),
            outcome.dropped()
        ))
    }
}

fn skipped(stage: Stage) -> StageReport {
    StageReport {
        stage,
        outcome: StageOutcome::Skipped,
    }
}
