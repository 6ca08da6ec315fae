//! Pipeline runner
//!
//! Threads one analysis run through the five stages in fixed order:
//! INGEST → COMPUTE → ALERT → RECOMMEND → REPORT
//!
//! Strictly sequential, one fresh state per run, no cross-run mutation.
//! Only ingestion failures abort; a failed model call degrades to fallback
//! recommendations and the run still produces a complete report.

use crate::config::PipelineConfig;
use crate::llm::ModelClient;
use crate::models::{RawDailyRecord, Report};
use crate::stages::{alerts, ingest, metrics, recommend, report};
use crate::Result;
use std::sync::Arc;
use tracing::info;

/// The analytics pipeline. Stateless between runs; concurrent callers can
/// share one instance because each run builds its own state.
pub struct Pipeline {
    model: Arc<dyn ModelClient>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(model: Arc<dyn ModelClient>, config: PipelineConfig) -> Self {
        Self { model, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run a complete analysis over two raw daily records.
    pub async fn run(
        &self,
        today: &RawDailyRecord,
        yesterday: &RawDailyRecord,
    ) -> Result<Report> {
        info!("Pipeline: starting analysis run");

        // === INGEST ===
        let ingested = ingest::ingest(today, yesterday)?;

        // === COMPUTE ===
        let computed = metrics::compute(ingested);

        // === ALERT ===
        let evaluated = alerts::evaluate(computed, &self.config.thresholds);

        // === RECOMMEND ===
        let advised =
            recommend::recommend(evaluated, self.model.as_ref(), self.config.model.timeout).await;

        // === REPORT ===
        let report = report::assemble(advised);

        info!(
            alert_count = report.alerts.len(),
            action_priority = %report.action_priority,
            "Pipeline: analysis run complete"
        );

        Ok(report)
    }
}
