use serde::{Deserialize, Serialize};

pub const DEFAULT_DAILY_LIMIT: u64 = 100_000;
pub const DEFAULT_MONTHLY_LIMIT: u64 = 2_000_000;

/// Structured record describing one analyzed day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    #[serde(default)]
    pub date: String,
    pub flow_score: u32,
    pub dominant_emotion: String,
    pub tags: Vec<String>,
    pub summary_text: String,
    pub top_activities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_context: Option<String>,
}

impl DailySummary {
    /// Visual context with surrounding whitespace removed; blank text counts as absent.
    pub fn visual_context_text(&self) -> Option<&str> {
        self.visual_context
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    pub fn has_visual_context(&self) -> bool {
        self.visual_context_text().is_some()
    }
}

/// Raw telemetry document written by the upstream collector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryRecord {
    pub meta: TelemetryMeta,
    pub metrics: TelemetryMetrics,
    pub events: Vec<TelemetryEvent>,
}

impl TelemetryRecord {
    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryMeta {
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryMetrics {
    pub total_keystrokes: u64,
    #[serde(rename = "total_mouse_dist_pixels")]
    pub total_mouse_distance: f64,
    pub flow_score_estimate: f64,
    pub top_window: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryEvent {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Point-in-time copy of the persisted ledger fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerSnapshot {
    pub daily_limit: u64,
    pub monthly_limit: u64,
    pub daily_used: u64,
    pub monthly_used: u64,
    pub last_reset_day: String,
    pub last_reset_month: String,
}

impl Default for LedgerSnapshot {
    fn default() -> Self {
        Self {
            daily_limit: DEFAULT_DAILY_LIMIT,
            monthly_limit: DEFAULT_MONTHLY_LIMIT,
            daily_used: 0,
            monthly_used: 0,
            last_reset_day: String::new(),
            last_reset_month: String::new(),
        }
    }
}

impl LedgerSnapshot {
    /// Negative once usage overshoots the limit.
    pub fn daily_remaining(&self) -> i128 {
        i128::from(self.daily_limit) - i128::from(self.daily_used)
    }

    pub fn monthly_remaining(&self) -> i128 {
        i128::from(self.monthly_limit) - i128::from(self.monthly_used)
    }
}
