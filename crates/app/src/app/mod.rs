use std::path::PathBuf;
use std::sync::Arc;

use daybook_budget::{Clock, LEDGER_FILE_NAME, Ledger, LedgerOptions, SystemClock};

use crate::services::AppServices;

/// Paths and limits needed to run the local pipeline.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub ledger_path: PathBuf,
    pub ledger_options: LedgerOptions,
}

impl AppConfig {
    pub fn new(data_dir: PathBuf, ledger_options: LedgerOptions) -> Self {
        let ledger_path = data_dir.join(LEDGER_FILE_NAME);
        Self {
            data_dir,
            ledger_path,
            ledger_options,
        }
    }
}

/// Application state shared by frontends.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub ledger: Arc<Ledger>,
    pub services: AppServices,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: AppConfig, clock: Arc<dyn Clock>) -> Self {
        let ledger = Arc::new(Ledger::open(
            config.ledger_path.clone(),
            config.ledger_options,
            clock,
        ));
        let services = AppServices::new(&config, ledger.clone());
        Self {
            config,
            ledger,
            services,
        }
    }
}
