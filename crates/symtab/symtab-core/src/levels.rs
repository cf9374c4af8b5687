//! Logging severities kept as an ordered symbol table.
//!
//! Levels use the conventional numeric scale (`NOTSET=0` .. `CRITICAL=50`,
//! step 10) so a user preference can be stored either by name or by number
//! and converted in both directions, then applied to the `log` facade.

use std::time::Instant;

use log::{info, log, Level, LevelFilter};
use once_cell::sync::Lazy;

use crate::error::TableError;
use crate::index::{Entry, EntryIndex};
use crate::lookup::{Code, SymbolRef};
use crate::table::SymbolTable;

pub const NOTSET: Code = 0;
pub const DEBUG: Code = 10;
pub const INFO: Code = 20;
pub const WARNING: Code = 30;
pub const ERROR: Code = 40;
pub const CRITICAL: Code = 50;

pub const TABLE_NAME: &str = "logLevels";

static LOG_LEVELS: Lazy<SymbolTable> = Lazy::new(|| {
    let entries = [
        ("NOTSET", NOTSET),
        ("DEBUG", DEBUG),
        ("INFO", INFO),
        ("WARNING", WARNING),
        ("ERROR", ERROR),
        ("CRITICAL", CRITICAL),
    ]
    .into_iter()
    .map(|(key, code)| Entry::new(key, code, None))
    .collect();
    SymbolTable::from_index(Some(TABLE_NAME.to_string()), EntryIndex::from_sorted(entries))
});

/// The shared level table, ascending by severity.
pub fn log_levels() -> &'static SymbolTable {
    &LOG_LEVELS
}

/// Numeric level for a name; a valid number is returned unchanged.
pub fn name_to_level<'r>(level: impl Into<SymbolRef<'r>>) -> Result<Code, TableError> {
    LOG_LEVELS.index_of(level)
}

/// Name for a numeric level; a valid name is returned unchanged.
pub fn level_to_name<'r>(level: impl Into<SymbolRef<'r>>) -> Result<&'static str, TableError> {
    log_levels().key_of(level)
}

/// Map a table level onto the `log` facade. `NOTSET` lets everything
/// through; `CRITICAL` has no separate facade level and shares `Error`.
pub fn to_level_filter<'r>(level: impl Into<SymbolRef<'r>>) -> Result<LevelFilter, TableError> {
    let filter = match name_to_level(level)? {
        NOTSET => LevelFilter::Trace,
        DEBUG => LevelFilter::Debug,
        INFO => LevelFilter::Info,
        WARNING => LevelFilter::Warn,
        _ => LevelFilter::Error,
    };
    Ok(filter)
}

/// `log` facade level that a record at table level `level` is emitted with.
pub fn to_log_level<'r>(level: impl Into<SymbolRef<'r>>) -> Result<Level, TableError> {
    let level = match name_to_level(level)? {
        NOTSET => Level::Trace,
        DEBUG => Level::Debug,
        INFO => Level::Info,
        WARNING => Level::Warn,
        _ => Level::Error,
    };
    Ok(level)
}

/// Table level for a `log` facade level. `Trace` has no named counterpart
/// and maps to `NOTSET`.
pub fn from_log_level(level: Level) -> Code {
    match level {
        Level::Trace => NOTSET,
        Level::Debug => DEBUG,
        Level::Info => INFO,
        Level::Warn => WARNING,
        Level::Error => ERROR,
    }
}

/// Resolve a stored preference, capped at `WARNING` so a saved preference
/// can never silence warnings.
pub fn preference_level<'r>(preference: impl Into<SymbolRef<'r>>) -> Result<Code, TableError> {
    Ok(name_to_level(preference)?.min(WARNING))
}

/// Facade filter for a stored preference. Does not touch the logger.
pub fn preference_filter<'r>(
    preference: impl Into<SymbolRef<'r>>,
) -> Result<LevelFilter, TableError> {
    to_level_filter(preference_level(preference)?)
}

/// Resolve a stored preference and install it as the `log` max level.
pub fn apply_preference<'r>(
    preference: impl Into<SymbolRef<'r>>,
) -> Result<LevelFilter, TableError> {
    let level = preference_level(preference)?;
    let filter = to_level_filter(level)?;
    log::set_max_level(filter);
    info!(
        "setting log level to user preference: {} ({})",
        level_to_name(level)?,
        level
    );
    Ok(filter)
}

/// Run `f` and log how long it took at table level `level`. The level is
/// resolved first; an unknown level is an error and `f` does not run.
pub fn timed<'r, T>(
    level: impl Into<SymbolRef<'r>>,
    label: &str,
    f: impl FnOnce() -> T,
) -> Result<T, TableError> {
    let level = to_log_level(level)?;
    let start = Instant::now();
    let out = f();
    log!(level, "{label} took {:?}", start.elapsed());
    Ok(out)
}
