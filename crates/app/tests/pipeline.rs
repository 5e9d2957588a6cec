mod support;

use std::fs;

use daybook_app::{AnalysisMode, AppError, estimate_text_tokens, estimate_vision_tokens};
use daybook_budget::LedgerOptions;
use daybook_core::DailySummary;
use llm_client::LlmError;
use support::{ANALYSIS_JSON, Reply, ScriptedClient, TELEMETRY, fixture, fixture_with};

fn fenced(body: &str) -> String {
    format!("```json\n{body}\n```")
}

#[tokio::test]
async fn remote_analysis_spends_estimate_and_writes_artifacts() {
    let fx = fixture();
    fx.write_telemetry(TELEMETRY);
    let client = ScriptedClient::new(Reply::Text(fenced(ANALYSIS_JSON)), Reply::Fail(500));

    let report = fx
        .state
        .services
        .reports
        .run(fx.date, client.clone())
        .await
        .expect("run");

    assert_eq!(report.mode, AnalysisMode::Remote);
    assert_eq!(report.summary.date, "2025-01-15");
    assert_eq!(report.summary.flow_score, 81);
    assert_eq!(report.summary.dominant_emotion, "Focus");
    assert_eq!(report.summary.tags, vec!["#coding", "#deep-work"]);
    assert!(report.summary.visual_context.is_none());
    assert_eq!(client.text_calls(), 1);
    assert_eq!(client.vision_calls(), 0);
    assert_eq!(fx.daily_used(), estimate_text_tokens(TELEMETRY.len()));

    let prompt = client.user_prompts.lock()[0].clone();
    assert!(prompt.starts_with("Here is the telemetry data for 2025-01-15:"));
    assert!(prompt.ends_with(TELEMETRY));

    let layout = fx.layout();
    let markdown = fs::read_to_string(layout.markdown_path()).expect("markdown");
    assert_eq!(markdown, report.markdown);
    assert!(markdown.starts_with("# Daily Report: 2025-01-15"));
    let stored: DailySummary = serde_json::from_str(
        &fs::read_to_string(layout.structured_path()).expect("structured json"),
    )
    .expect("parse structured json");
    assert_eq!(stored, report.summary);
}

#[tokio::test]
async fn exhausted_budget_falls_back_offline() {
    let fx = fixture();
    fx.write_telemetry(TELEMETRY);
    fx.state.ledger.spend(100_000);
    assert!(fx.state.services.budget.is_exhausted());
    let client = ScriptedClient::new(Reply::Text(ANALYSIS_JSON.to_string()), Reply::Fail(500));

    let report = fx
        .state
        .services
        .reports
        .run(fx.date, client.clone())
        .await
        .expect("run");

    assert_eq!(report.mode, AnalysisMode::Offline);
    assert_eq!(client.text_calls(), 0);
    assert_eq!(report.summary.top_activities, vec!["Editor", "Browser"]);
    assert_eq!(report.summary.flow_score, 72);
    assert_eq!(report.summary.tags, vec!["#offline", "#auto-generated"]);
    assert_eq!(report.summary.date, "2025-01-15");
    assert_eq!(fx.daily_used(), 100_000);
    assert!(fx.layout().markdown_path().exists());
    assert!(fx.layout().structured_path().exists());
}

#[tokio::test]
async fn offline_path_skips_vision_even_with_screenshots() {
    let fx = fixture_with(LedgerOptions {
        daily_limit: 10,
        monthly_limit: 10,
    });
    fx.write_telemetry(TELEMETRY);
    fx.write_snaps(&["a.png"]);
    let client = ScriptedClient::new(Reply::Fail(500), Reply::Text("seen".to_string()));

    let report = fx
        .state
        .services
        .reports
        .run(fx.date, client.clone())
        .await
        .expect("run");

    assert_eq!(report.mode, AnalysisMode::Offline);
    assert_eq!(client.vision_calls(), 0);
    assert!(report.summary.visual_context.is_none());
}

#[tokio::test]
async fn primary_failure_is_fatal_and_spends_nothing() {
    let fx = fixture();
    fx.write_telemetry(TELEMETRY);
    let client = ScriptedClient::new(Reply::Fail(502), Reply::Text("unused".to_string()));

    let err = fx
        .state
        .services
        .reports
        .run(fx.date, client.clone())
        .await
        .expect_err("primary failure");

    assert!(matches!(
        err,
        AppError::Llm(LlmError::Status { status: 502, .. })
    ));
    assert_eq!(fx.daily_used(), 0);
    assert!(!fx.layout().markdown_path().exists());
}

#[tokio::test]
async fn malformed_primary_response_is_fatal_with_raw_text() {
    let fx = fixture();
    fx.write_telemetry(TELEMETRY);
    let client = ScriptedClient::new(
        Reply::Text("Here is your day: great!".to_string()),
        Reply::Fail(500),
    );

    let err = fx
        .state
        .services
        .reports
        .run(fx.date, client)
        .await
        .expect_err("malformed");

    match err {
        AppError::MalformedResponse { raw, .. } => assert_eq!(raw, "Here is your day: great!"),
        other => panic!("unexpected error: {other}"),
    }
    // the call itself succeeded, so its cost stays recorded
    assert_eq!(fx.daily_used(), estimate_text_tokens(TELEMETRY.len()));
}

#[tokio::test]
async fn vision_failure_degrades_to_text_only() {
    let fx = fixture();
    fx.write_telemetry(TELEMETRY);
    fx.write_snaps(&["snap_0900.png", "snap_1000.png"]);
    let client = ScriptedClient::new(Reply::Text(ANALYSIS_JSON.to_string()), Reply::Fail(503));

    let report = fx
        .state
        .services
        .reports
        .run(fx.date, client.clone())
        .await
        .expect("run");

    assert_eq!(client.vision_calls(), 1);
    assert!(report.summary.visual_context.is_none());
    assert!(!report.markdown.contains("Visual Context"));
    assert_eq!(fx.daily_used(), estimate_text_tokens(TELEMETRY.len()));
}

#[tokio::test]
async fn vision_success_adds_context_from_three_newest_images() {
    let fx = fixture();
    fx.write_telemetry(TELEMETRY);
    fx.write_snaps(&[
        "snap_0900.png",
        "snap_1000.png",
        "snap_1100.jpg",
        "snap_1200.png",
        "readme.txt",
    ]);
    let client = ScriptedClient::new(
        Reply::Text(ANALYSIS_JSON.to_string()),
        Reply::Text("  Editing Rust code in a terminal editor.\n".to_string()),
    );

    let report = fx
        .state
        .services
        .reports
        .run(fx.date, client.clone())
        .await
        .expect("run");

    assert_eq!(
        report.summary.visual_context.as_deref(),
        Some("Editing Rust code in a terminal editor.")
    );
    assert!(report.markdown.contains("## Visual Context"));
    let images = client.vision_images.lock().clone();
    assert_eq!(images.len(), 3);
    assert_eq!(images[0].mime, "image/png");
    assert_eq!(images[1].mime, "image/jpeg");
    assert_eq!(
        fx.daily_used(),
        estimate_text_tokens(TELEMETRY.len()) + estimate_vision_tokens(3)
    );
}

#[tokio::test]
async fn vision_is_skipped_when_budget_cannot_cover_it() {
    let text_estimate = estimate_text_tokens(TELEMETRY.len());
    let fx = fixture_with(LedgerOptions {
        daily_limit: text_estimate + 5_000,
        monthly_limit: 2_000_000,
    });
    fx.write_telemetry(TELEMETRY);
    fx.write_snaps(&["a.png"]);
    let client = ScriptedClient::new(
        Reply::Text(ANALYSIS_JSON.to_string()),
        Reply::Text("unused".to_string()),
    );

    let report = fx
        .state
        .services
        .reports
        .run(fx.date, client.clone())
        .await
        .expect("run");

    assert_eq!(report.mode, AnalysisMode::Remote);
    assert_eq!(client.vision_calls(), 0);
    assert!(report.summary.visual_context.is_none());
    assert_eq!(fx.daily_used(), text_estimate);
}

#[tokio::test]
async fn missing_telemetry_is_fatal() {
    let fx = fixture();
    let client = ScriptedClient::new(Reply::Text(ANALYSIS_JSON.to_string()), Reply::Fail(500));

    let err = fx
        .state
        .services
        .reports
        .run(fx.date, client.clone())
        .await
        .expect_err("missing telemetry");

    assert!(matches!(err, AppError::Ingest(ingest::IngestError::Io(_))));
    assert_eq!(client.text_calls(), 0);
}

#[tokio::test]
async fn unparsable_telemetry_fails_offline_path() {
    let fx = fixture_with(LedgerOptions {
        daily_limit: 1,
        monthly_limit: 1,
    });
    fx.write_telemetry("{\"events\": [");
    let client = ScriptedClient::new(Reply::Fail(500), Reply::Fail(500));

    let err = fx
        .state
        .services
        .reports
        .run(fx.date, client)
        .await
        .expect_err("bad telemetry");

    assert!(matches!(
        err,
        AppError::Ingest(ingest::IngestError::Telemetry(_))
    ));
}

#[tokio::test]
async fn next_day_budget_allows_remote_again() {
    let fx = fixture();
    fx.write_telemetry(TELEMETRY);
    fx.state.ledger.spend(100_000);

    fx.clock
        .set(chrono::NaiveDate::from_ymd_opt(2025, 1, 16).expect("date"));
    let client = ScriptedClient::new(Reply::Text(ANALYSIS_JSON.to_string()), Reply::Fail(500));
    let report = fx
        .state
        .services
        .reports
        .pipeline(fx.date, client)
        .analyze()
        .await
        .expect("analyze");

    assert_eq!(report.mode, AnalysisMode::Remote);
    let snapshot = fx.state.services.budget.snapshot();
    assert_eq!(snapshot.daily_used, estimate_text_tokens(TELEMETRY.len()));
    assert_eq!(
        snapshot.monthly_used,
        100_000 + estimate_text_tokens(TELEMETRY.len())
    );
}
