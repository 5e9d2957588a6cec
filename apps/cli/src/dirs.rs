use std::path::PathBuf;

use daybook_budget::LEDGER_FILE_NAME;

use crate::config::CliConfig;

const DATA_DIR_VAR: &str = "DAYBOOK_DATA_DIR";

#[derive(Debug, Clone)]
pub struct DataDirResolution {
    pub dir: PathBuf,
    pub matched_existing: bool,
}

/// Environment override first, then the config file, then `$HOME/Daybook_Data`.
pub fn resolve_data_dir(config: &CliConfig) -> DataDirResolution {
    let dir = std::env::var(DATA_DIR_VAR)
        .ok()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(ingest::default_data_dir);
    let matched_existing = dir.join(LEDGER_FILE_NAME).exists();
    DataDirResolution {
        dir,
        matched_existing,
    }
}
