#[derive(Debug, thiserror::Error)]
pub enum BudgetError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ledger json error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BudgetError>;
