#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use daybook_budget::{LEDGER_FILE_NAME, Ledger, LedgerOptions, ManualClock};
use tempfile::TempDir;

pub struct TestLedger {
    pub _dir: TempDir,
    pub path: PathBuf,
    pub clock: Arc<ManualClock>,
    pub ledger: Ledger,
}

impl TestLedger {
    pub fn reopen(&self) -> Ledger {
        Ledger::open(&self.path, LedgerOptions::default(), self.clock.clone())
    }
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("date")
}

pub fn setup_ledger(today: &str) -> TestLedger {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(LEDGER_FILE_NAME);
    let clock = Arc::new(ManualClock::new(date(today)));
    let ledger = Ledger::open(&path, LedgerOptions::default(), clock.clone());
    TestLedger {
        _dir: dir,
        path,
        clock,
        ledger,
    }
}
