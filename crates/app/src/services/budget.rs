use std::sync::Arc;

use daybook_budget::Ledger;
use daybook_core::LedgerSnapshot;

#[derive(Clone)]
pub struct BudgetService {
    ledger: Arc<Ledger>,
}

impl BudgetService {
    pub(super) fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }

    pub fn status(&self) -> String {
        self.ledger.status()
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.ledger.snapshot()
    }

    pub fn is_exhausted(&self) -> bool {
        self.ledger.is_exhausted()
    }
}
