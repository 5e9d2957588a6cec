use daybook_core::{DailySummary, TelemetryRecord};
use ingest::distinct_titles;

pub const OFFLINE_EMOTION: &str = "Neutral (Offline Mode)";
pub const OFFLINE_TAGS: [&str; 2] = ["#offline", "#auto-generated"];
pub const MAX_TOP_ACTIVITIES: usize = 5;

/// Summary built from local telemetry alone when the budget denies the remote analysis.
pub fn offline_summary(record: &TelemetryRecord) -> DailySummary {
    let titles = distinct_titles(record);
    let estimate = record.metrics.flow_score_estimate;
    let summary_text = format!(
        "Token budget exhausted. Recorded {} events, {} keystrokes across {} applications. Flow score was {:.1}.",
        record.event_count(),
        record.metrics.total_keystrokes,
        titles.len(),
        estimate
    );
    DailySummary {
        date: String::new(),
        // float-to-int casts truncate toward zero and saturate at the type bounds
        flow_score: estimate as u32,
        dominant_emotion: OFFLINE_EMOTION.to_string(),
        tags: OFFLINE_TAGS.iter().map(|tag| tag.to_string()).collect(),
        summary_text,
        top_activities: titles
            .into_iter()
            .take(MAX_TOP_ACTIVITIES)
            .map(str::to_string)
            .collect(),
        visual_context: None,
    }
}
