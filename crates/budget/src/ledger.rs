use std::ffi::OsString;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use daybook_core::{DEFAULT_DAILY_LIMIT, DEFAULT_MONTHLY_LIMIT, LedgerSnapshot};
use fs2::FileExt;
use parking_lot::Mutex;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::error::Result;

pub const LEDGER_FILE_NAME: &str = "token_budget.json";

const DAY_FORMAT: &str = "%Y-%m-%d";
const MONTH_FORMAT: &str = "%Y-%m";

/// Limits applied when no ledger file exists yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerOptions {
    pub daily_limit: u64,
    pub monthly_limit: u64,
}

impl Default for LedgerOptions {
    fn default() -> Self {
        Self {
            daily_limit: DEFAULT_DAILY_LIMIT,
            monthly_limit: DEFAULT_MONTHLY_LIMIT,
        }
    }
}

/// Daily/monthly token counters persisted to a single JSON file.
///
/// Every operation holds the in-process lock and an advisory lock on `<path>.lock` from the
/// reload through persist, so gate/spend cycles never lose an update even when several
/// processes share the file.
pub struct Ledger {
    path: PathBuf,
    clock: Arc<dyn Clock>,
    state: Mutex<LedgerState>,
}

#[derive(Debug)]
struct LedgerState {
    snapshot: LedgerSnapshot,
    // Set while memory holds spends the file does not; reloads are skipped until a save lands.
    unsaved: bool,
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("path", &self.path)
            .field("state", &self.state.lock().snapshot)
            .finish()
    }
}

impl Ledger {
    pub fn open(path: impl Into<PathBuf>, options: LedgerOptions, clock: Arc<dyn Clock>) -> Self {
        let path = path.into();
        let defaults = LedgerSnapshot {
            daily_limit: options.daily_limit,
            monthly_limit: options.monthly_limit,
            ..LedgerSnapshot::default()
        };
        let mut snapshot = match load_state(&path, &defaults) {
            Ok(Some(state)) => state,
            Ok(None) => defaults,
            Err(err) => {
                warn!(
                    path = %path.display(),
                    "could not parse token ledger, using defaults: {}", err
                );
                defaults
            }
        };
        reset_if_needed(&mut snapshot, clock.today());
        Self {
            path,
            clock,
            state: Mutex::new(LedgerState {
                snapshot,
                unsaved: false,
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn can_spend(&self, tokens: u64) -> bool {
        self.with_state(|state| {
            state.daily_used.saturating_add(tokens) <= state.daily_limit
                && state.monthly_used.saturating_add(tokens) <= state.monthly_limit
        })
    }

    /// Records usage without re-checking limits; callers gate with `can_spend` first.
    pub fn spend(&self, tokens: u64) {
        let mut state = self.state.lock();
        let _file_lock = FileLock::acquire(&self.path);
        self.refresh(&mut state);
        let snapshot = &mut state.snapshot;
        snapshot.daily_used = snapshot.daily_used.saturating_add(tokens);
        snapshot.monthly_used = snapshot.monthly_used.saturating_add(tokens);
        let saved = save_state(&self.path, snapshot);
        info!(
            tokens,
            daily_remaining = snapshot.daily_remaining(),
            monthly_remaining = snapshot.monthly_remaining(),
            "token budget spent"
        );
        match saved {
            Ok(()) => state.unsaved = false,
            Err(err) => {
                warn!(path = %self.path.display(), "could not persist token ledger: {}", err);
                state.unsaved = true;
            }
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.with_state(|state| {
            state.daily_used >= state.daily_limit || state.monthly_used >= state.monthly_limit
        })
    }

    pub fn status(&self) -> String {
        self.with_state(|state| {
            format!(
                "Daily: {}/{} | Monthly: {}/{}",
                state.daily_used, state.daily_limit, state.monthly_used, state.monthly_limit
            )
        })
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.with_state(|state| state.clone())
    }

    fn with_state<T>(&self, read: impl FnOnce(&LedgerSnapshot) -> T) -> T {
        let mut state = self.state.lock();
        let _file_lock = FileLock::acquire(&self.path);
        self.refresh(&mut state);
        read(&state.snapshot)
    }

    /// Pulls counters other handles may have written, then runs the reset pass.
    /// Limits stay as they were at open.
    fn refresh(&self, state: &mut LedgerState) {
        if !state.unsaved {
            match read_stored(&self.path) {
                Ok(Some(stored)) => stored.apply_usage(&mut state.snapshot),
                Ok(None) => {}
                Err(err) => debug!(path = %self.path.display(), "keeping in-memory ledger: {}", err),
            }
        }
        reset_if_needed(&mut state.snapshot, self.clock.today());
    }
}

/// Exclusive advisory lock on the sidecar file, released on drop.
struct FileLock {
    file: fs::File,
}

impl FileLock {
    fn acquire(path: &Path) -> Option<Self> {
        let lock_path = sidecar_path(path, "lock");
        match open_locked(&lock_path) {
            Ok(file) => Some(Self { file }),
            Err(err) => {
                warn!(path = %lock_path.display(), "could not lock token ledger: {}", err);
                None
            }
        }
    }
}

fn open_locked(lock_path: &Path) -> io::Result<fs::File> {
    if let Some(parent) = lock_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .read(true)
        .write(true)
        .open(lock_path)?;
    FileExt::lock_exclusive(&file)?;
    Ok(file)
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoredLedger {
    daily_limit: Option<u64>,
    monthly_limit: Option<u64>,
    daily_used: Option<u64>,
    monthly_used: Option<u64>,
    last_reset_day: Option<String>,
    last_reset_month: Option<String>,
}

impl StoredLedger {
    fn apply_usage(self, snapshot: &mut LedgerSnapshot) {
        if let Some(value) = self.daily_used {
            snapshot.daily_used = value;
        }
        if let Some(value) = self.monthly_used {
            snapshot.monthly_used = value;
        }
        if let Some(value) = self.last_reset_day {
            snapshot.last_reset_day = value;
        }
        if let Some(value) = self.last_reset_month {
            snapshot.last_reset_month = value;
        }
    }
}

fn read_stored(path: &Path) -> Result<Option<StoredLedger>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    Ok(Some(serde_json::from_str(&contents)?))
}

fn load_state(path: &Path, defaults: &LedgerSnapshot) -> Result<Option<LedgerSnapshot>> {
    let Some(stored) = read_stored(path)? else {
        return Ok(None);
    };
    let mut snapshot = LedgerSnapshot {
        daily_limit: positive_or(stored.daily_limit, defaults.daily_limit, "daily_limit"),
        monthly_limit: positive_or(stored.monthly_limit, defaults.monthly_limit, "monthly_limit"),
        ..defaults.clone()
    };
    stored.apply_usage(&mut snapshot);
    Ok(Some(snapshot))
}

fn positive_or(value: Option<u64>, default: u64, field: &str) -> u64 {
    match value {
        Some(0) => {
            warn!(field, default, "ignoring non-positive ledger limit");
            default
        }
        Some(value) => value,
        None => default,
    }
}

fn save_state(path: &Path, state: &LedgerSnapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp_path = sidecar_path(path, "tmp");
    let file = fs::File::create(&tmp_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, state)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

fn sidecar_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

fn reset_if_needed(state: &mut LedgerSnapshot, today: NaiveDate) -> bool {
    let day = today.format(DAY_FORMAT).to_string();
    let month = today.format(MONTH_FORMAT).to_string();
    let mut changed = false;
    if state.last_reset_day != day {
        state.daily_used = 0;
        state.last_reset_day = day;
        changed = true;
        info!("token budget daily counter reset");
    }
    if state.last_reset_month != month {
        state.monthly_used = 0;
        state.last_reset_month = month;
        changed = true;
        info!("token budget monthly counter reset");
    }
    changed
}
