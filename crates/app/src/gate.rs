use std::sync::Arc;

use daybook_budget::Ledger;
use tracing::warn;

/// Allowance for the completion text on top of the prompt estimate.
pub const RESPONSE_OVERHEAD_TOKENS: u64 = 500;
pub const TOKENS_PER_IMAGE: u64 = 10_000;

/// Roughly four bytes of prompt per token, rounded up, plus the response allowance.
pub fn estimate_text_tokens(input_bytes: usize) -> u64 {
    (input_bytes as u64).div_ceil(4) + RESPONSE_OVERHEAD_TOKENS
}

pub fn estimate_vision_tokens(images: usize) -> u64 {
    images as u64 * TOKENS_PER_IMAGE
}

/// Budget check in front of one remote call.
#[derive(Clone, Debug)]
pub struct RequestGate {
    ledger: Arc<Ledger>,
}

impl RequestGate {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Returns `None` when the estimate does not fit the remaining budget.
    pub fn admit(&self, estimate: u64) -> Option<SpendPermit<'_>> {
        if !self.ledger.can_spend(estimate) {
            warn!(estimate, status = %self.ledger.status(), "token budget denied request");
            return None;
        }
        Some(SpendPermit {
            ledger: &self.ledger,
            estimate,
        })
    }
}

/// Approval for one call. Commit only after the call succeeded; dropping it spends nothing.
#[must_use = "an admitted call must commit its permit once the response arrives"]
#[derive(Debug)]
pub struct SpendPermit<'a> {
    ledger: &'a Ledger,
    estimate: u64,
}

impl SpendPermit<'_> {
    pub fn estimate(&self) -> u64 {
        self.estimate
    }

    pub fn commit(self) {
        self.ledger.spend(self.estimate);
    }
}
