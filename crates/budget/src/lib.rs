mod clock;
mod error;
mod ledger;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{BudgetError, Result};
pub use ledger::{LEDGER_FILE_NAME, Ledger, LedgerOptions};
