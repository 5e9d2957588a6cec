mod budget;
mod reports;

use std::sync::Arc;

use daybook_budget::Ledger;

use crate::app::AppConfig;

pub use budget::BudgetService;
pub use reports::ReportService;

type SharedConfig = Arc<AppConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub budget: BudgetService,
    pub reports: ReportService,
}

impl AppServices {
    pub fn new(config: &AppConfig, ledger: Arc<Ledger>) -> Self {
        let shared = Arc::new(config.clone());
        Self {
            budget: BudgetService::new(ledger.clone()),
            reports: ReportService::new(shared, ledger),
        }
    }
}
