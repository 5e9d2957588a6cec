use std::fs;
use std::io::{BufWriter, Write};
use std::sync::Arc;

use daybook_core::DailySummary;
use ingest::{
    DayLayout, MAX_SCREENSHOTS, encode_screenshots, parse_telemetry, read_telemetry,
    recent_screenshots,
};
use llm_client::{CompletionClient, ImageAttachment};
use tracing::{info, warn};

use crate::error::Result;
use crate::fallback::offline_summary;
use crate::gate::{RequestGate, estimate_text_tokens, estimate_vision_tokens};
use crate::narrative::render_markdown;
use crate::prompts::{
    ANALYSIS_SYSTEM_PROMPT, VISION_SYSTEM_PROMPT, analysis_user_prompt, vision_user_prompt,
};
use crate::response::parse_analysis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    Remote,
    Offline,
}

/// Result of one run, ready to be written out.
#[derive(Debug, Clone)]
pub struct DayReport {
    pub summary: DailySummary,
    pub markdown: String,
    pub mode: AnalysisMode,
}

/// Gate → primary analysis → optional vision pass → narrative, for a single day.
pub struct DayPipeline {
    layout: DayLayout,
    client: Arc<dyn CompletionClient>,
    gate: RequestGate,
}

impl DayPipeline {
    pub fn new(layout: DayLayout, client: Arc<dyn CompletionClient>, gate: RequestGate) -> Self {
        Self {
            layout,
            client,
            gate,
        }
    }

    pub fn layout(&self) -> &DayLayout {
        &self.layout
    }

    pub async fn analyze(&self) -> Result<DayReport> {
        let date = self.layout.date_label();
        let raw = read_telemetry(&self.layout.telemetry_path())?;

        let estimate = estimate_text_tokens(raw.len());
        let Some(permit) = self.gate.admit(estimate) else {
            warn!("token budget exhausted, generating offline summary");
            let record = parse_telemetry(&raw)?;
            let mut summary = offline_summary(&record);
            summary.date = date;
            return Ok(finish(summary, AnalysisMode::Offline));
        };

        info!(estimate, "requesting telemetry analysis");
        let response = self
            .client
            .chat(ANALYSIS_SYSTEM_PROMPT, &analysis_user_prompt(&date, &raw))
            .await?;
        permit.commit();

        let mut summary = parse_analysis(&response)?.into_summary(date);
        summary.visual_context = self.analyze_screenshots().await;
        Ok(finish(summary, AnalysisMode::Remote))
    }

    /// Best effort: any failure or denial leaves the report without visual context.
    async fn analyze_screenshots(&self) -> Option<String> {
        let shots = recent_screenshots(&self.layout.visual_snaps_dir(), MAX_SCREENSHOTS);
        if shots.is_empty() {
            return None;
        }
        let batch = encode_screenshots(&shots);
        if !batch.issues.is_empty() {
            warn!(
                skipped = batch.issues.len(),
                found = shots.len(),
                "some screenshots could not be read"
            );
        }
        let images: Vec<ImageAttachment> = batch
            .images
            .into_iter()
            .map(|image| ImageAttachment {
                mime: image.mime.to_string(),
                base64: image.base64,
            })
            .collect();
        if images.is_empty() {
            return None;
        }

        let estimate = estimate_vision_tokens(images.len());
        let Some(permit) = self.gate.admit(estimate) else {
            info!("skipping vision analysis, token budget exhausted");
            return None;
        };

        info!(images = images.len(), "analyzing screenshots");
        let prompt = vision_user_prompt(&self.layout.date_label(), images.len());
        match self
            .client
            .chat_with_vision(VISION_SYSTEM_PROMPT, &prompt, &images)
            .await
        {
            Ok(text) => {
                permit.commit();
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            }
            Err(err) => {
                warn!("vision analysis failed, continuing text-only: {}", err);
                None
            }
        }
    }

    /// Writes the markdown report and the structured JSON into the day directory.
    pub fn save(&self, report: &DayReport) -> Result<()> {
        fs::create_dir_all(&self.layout.day_dir)?;
        fs::write(self.layout.markdown_path(), &report.markdown)?;
        let file = fs::File::create(self.layout.structured_path())?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &report.summary)?;
        writer.flush()?;
        Ok(())
    }
}

fn finish(summary: DailySummary, mode: AnalysisMode) -> DayReport {
    let markdown = render_markdown(&summary);
    DayReport {
        summary,
        markdown,
        mode,
    }
}
