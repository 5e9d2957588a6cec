use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};

pub const TELEMETRY_FILE_NAME: &str = "raw_telemetry.json";
pub const MARKDOWN_FILE_NAME: &str = "daily_summary.md";
pub const STRUCTURED_FILE_NAME: &str = "daily_structured.json";
pub const VISUAL_SNAPS_DIR: &str = "visual_snaps";

const DATA_DIR_NAME: &str = "Daybook_Data";

pub fn default_data_dir() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(DATA_DIR_NAME);
    }
    PathBuf::from(DATA_DIR_NAME)
}

/// Per-day directory: `<data>/<year>/Q<n>/<Month>/Week_<iso week>/<YYYY-MM-DD>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayLayout {
    pub date: NaiveDate,
    pub day_dir: PathBuf,
}

impl DayLayout {
    pub fn new(data_dir: &Path, date: NaiveDate) -> Self {
        let day_dir = data_dir
            .join(date.year().to_string())
            .join(format!("Q{}", quarter(date)))
            .join(date.format("%B").to_string())
            .join(format!("Week_{}", date.iso_week().week()))
            .join(date.format("%Y-%m-%d").to_string());
        Self { date, day_dir }
    }

    pub fn date_label(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn telemetry_path(&self) -> PathBuf {
        self.day_dir.join(TELEMETRY_FILE_NAME)
    }

    pub fn visual_snaps_dir(&self) -> PathBuf {
        self.day_dir.join(VISUAL_SNAPS_DIR)
    }

    pub fn markdown_path(&self) -> PathBuf {
        self.day_dir.join(MARKDOWN_FILE_NAME)
    }

    pub fn structured_path(&self) -> PathBuf {
        self.day_dir.join(STRUCTURED_FILE_NAME)
    }
}

fn quarter(date: NaiveDate) -> u32 {
    (date.month() - 1) / 3 + 1
}
