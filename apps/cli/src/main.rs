mod args;
mod config;
mod dirs;

use std::process::ExitCode;
use std::sync::Arc;

use chrono::Local;
use daybook_app::{AnalysisMode, AppConfig, AppError, AppState, ensure_app_data_dir};
use llm_client::{API_KEY_VAR, ClientConfig, GroqClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("FATAL: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let args = args::parse_args().map_err(|err| {
        args::print_help();
        AppError::InvalidInput(err)
    })?;

    // Checked before the config file or the data directory is touched.
    let client_config = credentials(args.status, std::env::var(API_KEY_VAR).ok())?;

    let config = config::load_or_create().map_err(AppError::Config)?;
    if config.created {
        println!("Created config at {}.", config.file.display());
    }

    let data_dir = dirs::resolve_data_dir(&config.config);
    if data_dir.matched_existing {
        println!("Using existing data dir: {}", data_dir.dir.display());
    } else {
        println!("Using data dir: {}", data_dir.dir.display());
    }

    let app_config = AppConfig::new(data_dir.dir, config.config.ledger_options());
    ensure_app_data_dir(&app_config)?;
    let state = AppState::new(app_config);

    let Some(client_config) = client_config else {
        println!("{}", state.services.budget.status());
        return Ok(());
    };
    let client_config = client_config
        .with_base_url(config.config.base_url.clone())
        .with_timeout(config.config.request_timeout());
    let client = GroqClient::new(client_config)?;

    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    println!("===============================================");
    println!("       DAYBOOK: daily narrative                ");
    println!("===============================================");
    println!("Analyzing date: {}", date.format("%Y-%m-%d"));
    info!(status = %state.services.budget.status(), "token budget");

    let report = state.services.reports.run(date, Arc::new(client)).await?;
    let layout = state.services.reports.layout(date);

    if report.mode == AnalysisMode::Offline {
        println!("\nDONE (offline mode): token budget exhausted, template summary written.");
    } else {
        println!("\nSUCCESS: Daily narrative written.");
    }
    println!("   Story: {}", layout.markdown_path().display());
    println!("   Data:  {}", layout.structured_path().display());
    println!("   Budget: {}", state.services.budget.status());
    Ok(())
}

/// `--status` runs without a credential; every other run needs one.
fn credentials(status: bool, api_key: Option<String>) -> Result<Option<ClientConfig>, AppError> {
    if status {
        return Ok(None);
    }
    ClientConfig::from_api_key(api_key)
        .map(Some)
        .map_err(|err| AppError::Config(err.to_string()))
}
