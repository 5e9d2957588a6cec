use crate::Result;
use crate::app::AppConfig;

pub fn ensure_app_data_dir(config: &AppConfig) -> Result<()> {
    std::fs::create_dir_all(&config.data_dir)?;
    Ok(())
}
