#![allow(dead_code)]

use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use daybook_app::{AppConfig, AppState};
use daybook_budget::{LedgerOptions, ManualClock};
use ingest::DayLayout;
use llm_client::{CompletionClient, ImageAttachment, LlmError};
use parking_lot::Mutex;
use tempfile::TempDir;

pub const TELEMETRY: &str = r#"{"meta":{"date":"2025-01-15"},"metrics":{"total_keystrokes":500,"total_mouse_dist_pixels":2048.0,"flow_score_estimate":72.5,"top_window":"Editor"},"events":[{"title":"Editor","type":"focus"},{"title":"Editor","type":"focus"},{"title":"Browser","type":"focus"}]}"#;

pub const ANALYSIS_JSON: &str = r##"{"flow_score": 81, "dominant_emotion": "Focus", "tags": ["#coding", "#deep-work"], "summary_text": "A long stretch in the editor.", "top_activities": ["Editor", "Browser"]}"##;

#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Fail(u16),
}

impl Reply {
    fn into_result(self) -> Result<String, LlmError> {
        match self {
            Reply::Text(text) => Ok(text),
            Reply::Fail(status) => Err(LlmError::Status {
                status,
                body: "scripted failure".to_string(),
            }),
        }
    }
}

/// Completion client that answers from a script and records what it was asked.
pub struct ScriptedClient {
    text: Reply,
    vision: Reply,
    pub text_calls: AtomicUsize,
    pub vision_calls: AtomicUsize,
    pub vision_images: Mutex<Vec<ImageAttachment>>,
    pub user_prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new(text: Reply, vision: Reply) -> Arc<Self> {
        Arc::new(Self {
            text,
            vision,
            text_calls: AtomicUsize::new(0),
            vision_calls: AtomicUsize::new(0),
            vision_images: Mutex::new(Vec::new()),
            user_prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn text_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }

    pub fn vision_calls(&self) -> usize {
        self.vision_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn chat(&self, _system_prompt: &str, user_prompt: &str) -> Result<String, LlmError> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        self.user_prompts.lock().push(user_prompt.to_string());
        self.text.clone().into_result()
    }

    async fn chat_with_vision(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
        images: &[ImageAttachment],
    ) -> Result<String, LlmError> {
        self.vision_calls.fetch_add(1, Ordering::SeqCst);
        *self.vision_images.lock() = images.to_vec();
        self.vision.clone().into_result()
    }
}

pub struct Fixture {
    pub _dir: TempDir,
    pub state: AppState,
    pub clock: Arc<ManualClock>,
    pub date: NaiveDate,
}

impl Fixture {
    pub fn layout(&self) -> DayLayout {
        self.state.services.reports.layout(self.date)
    }

    pub fn write_telemetry(&self, contents: &str) {
        let layout = self.layout();
        fs::create_dir_all(&layout.day_dir).expect("create day dir");
        fs::write(layout.telemetry_path(), contents).expect("write telemetry");
    }

    pub fn write_snaps(&self, names: &[&str]) {
        let snaps = self.layout().visual_snaps_dir();
        fs::create_dir_all(&snaps).expect("create snaps dir");
        for name in names {
            fs::write(snaps.join(name), name.as_bytes()).expect("write snap");
        }
    }

    pub fn daily_used(&self) -> u64 {
        self.state.services.budget.snapshot().daily_used
    }
}

pub fn fixture() -> Fixture {
    fixture_with(LedgerOptions::default())
}

pub fn fixture_with(options: LedgerOptions) -> Fixture {
    let dir = tempfile::tempdir().expect("temp dir");
    let date = NaiveDate::from_ymd_opt(2025, 1, 15).expect("date");
    let clock = Arc::new(ManualClock::new(date));
    let config = AppConfig::new(dir.path().join("data"), options);
    let state = AppState::with_clock(config, clock.clone());
    Fixture {
        _dir: dir,
        state,
        clock,
        date,
    }
}
