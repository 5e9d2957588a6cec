pub mod app;
pub mod error;
pub mod fallback;
pub mod gate;
pub mod narrative;
pub mod pipeline;
pub mod prompts;
pub mod response;
pub mod services;
pub mod startup;

pub use app::{AppConfig, AppState};
pub use error::{AppError, Result};
pub use fallback::offline_summary;
pub use gate::{RequestGate, SpendPermit, estimate_text_tokens, estimate_vision_tokens};
pub use narrative::render_markdown;
pub use pipeline::{AnalysisMode, DayPipeline, DayReport};
pub use response::{AnalysisResponse, clean_response, parse_analysis};
pub use services::{AppServices, BudgetService, ReportService};
pub use startup::ensure_app_data_dir;
