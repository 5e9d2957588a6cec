use daybook_core::DailySummary;
use serde::Deserialize;

use crate::error::{AppError, Result};

const FENCE: &str = "```";

/// Shape the analysis prompt asks the model to return.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisResponse {
    pub flow_score: f64,
    pub dominant_emotion: String,
    pub tags: Vec<String>,
    pub summary_text: String,
    pub top_activities: Vec<String>,
}

impl AnalysisResponse {
    pub fn into_summary(self, date: impl Into<String>) -> DailySummary {
        DailySummary {
            date: date.into(),
            flow_score: self.flow_score.clamp(0.0, 100.0) as u32,
            dominant_emotion: self.dominant_emotion,
            tags: self.tags,
            summary_text: self.summary_text,
            top_activities: self.top_activities,
            visual_context: None,
        }
    }
}

/// Strips a leading fence line (with any language tag) and a trailing fence.
pub fn clean_response(raw: &str) -> &str {
    let mut text = raw.trim();
    if text.starts_with(FENCE) {
        if let Some(idx) = text.find('\n') {
            text = &text[idx + 1..];
        }
    }
    text.strip_suffix(FENCE).unwrap_or(text).trim()
}

pub fn parse_analysis(raw: &str) -> Result<AnalysisResponse> {
    serde_json::from_str(clean_response(raw)).map_err(|source| AppError::MalformedResponse {
        source,
        raw: raw.to_string(),
    })
}
