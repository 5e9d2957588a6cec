mod paths;
mod screenshots;
mod telemetry;
mod types;

pub use paths::{
    DayLayout, MARKDOWN_FILE_NAME, STRUCTURED_FILE_NAME, TELEMETRY_FILE_NAME, VISUAL_SNAPS_DIR,
    default_data_dir,
};
pub use screenshots::{
    EncodedImage, MAX_SCREENSHOTS, Screenshot, ScreenshotBatch, encode_screenshots,
    recent_screenshots,
};
pub use telemetry::{TelemetryStats, distinct_titles, parse_telemetry, read_telemetry};
pub use types::{IngestError, IngestIssue, Result};
