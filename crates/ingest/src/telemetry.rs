use std::fs;
use std::path::Path;

use daybook_core::TelemetryRecord;
use indexmap::IndexSet;

use crate::types::Result;

/// Reads the collector output verbatim; the remote prompt embeds it as-is.
pub fn read_telemetry(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

pub fn parse_telemetry(raw: &str) -> Result<TelemetryRecord> {
    Ok(serde_json::from_str(raw)?)
}

/// Distinct non-empty event titles in first-seen order.
pub fn distinct_titles(record: &TelemetryRecord) -> IndexSet<&str> {
    record
        .events
        .iter()
        .map(|event| event.title.as_str())
        .filter(|title| !title.is_empty())
        .collect()
}

/// Aggregate counts derived from one telemetry record.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryStats {
    pub events: usize,
    pub keystrokes: u64,
    pub distinct_apps: usize,
    pub flow_score_estimate: f64,
    pub top_window: String,
}

impl TelemetryStats {
    pub fn from_record(record: &TelemetryRecord) -> Self {
        Self {
            events: record.event_count(),
            keystrokes: record.metrics.total_keystrokes,
            distinct_apps: distinct_titles(record).len(),
            flow_score_estimate: record.metrics.flow_score_estimate,
            top_window: record.metrics.top_window.clone(),
        }
    }
}
