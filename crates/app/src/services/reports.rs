use std::sync::Arc;

use chrono::NaiveDate;
use daybook_budget::Ledger;
use ingest::DayLayout;
use llm_client::CompletionClient;

use crate::error::Result;
use crate::gate::RequestGate;
use crate::pipeline::{DayPipeline, DayReport};
use crate::services::SharedConfig;

#[derive(Clone)]
pub struct ReportService {
    config: SharedConfig,
    ledger: Arc<Ledger>,
}

impl ReportService {
    pub(super) fn new(config: SharedConfig, ledger: Arc<Ledger>) -> Self {
        Self { config, ledger }
    }

    pub fn layout(&self, date: NaiveDate) -> DayLayout {
        DayLayout::new(&self.config.data_dir, date)
    }

    pub fn pipeline(&self, date: NaiveDate, client: Arc<dyn CompletionClient>) -> DayPipeline {
        DayPipeline::new(
            self.layout(date),
            client,
            RequestGate::new(self.ledger.clone()),
        )
    }

    /// Analyzes one day and writes both artifacts.
    pub async fn run(
        &self,
        date: NaiveDate,
        client: Arc<dyn CompletionClient>,
    ) -> Result<DayReport> {
        let pipeline = self.pipeline(date, client);
        let report = pipeline.analyze().await?;
        pipeline.save(&report)?;
        Ok(report)
    }
}
