//! Logging utilities.
//!
//! The crate logs through the `log` facade: `debug!` for every solver pass
//! and layout decision, `warn!` when a request or a layout is lost. This
//! module offers an optional in-memory sink for those records, handy to
//! inspect what the solver did from a test or a debug overlay.

use lazy_static::lazy_static;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Saves all log records in a global deque.
pub struct LayoutLogger;

static LOGGER: LayoutLogger = LayoutLogger;

/// A log record.
#[derive(Debug, Clone)]
pub struct Record {
    /// Log level used for this record
    pub level: log::Level,
    /// Time this message was logged
    pub time: time::OffsetDateTime,
    /// Module that emitted the record
    pub target: String,
    /// Message content
    pub message: String,
}

lazy_static! {
    /// Circular buffer for logs.
    pub static ref LOGS: Mutex<VecDeque<Record>> = Mutex::new(VecDeque::new());
}

fn logs() -> MutexGuard<'static, VecDeque<Record>> {
    LOGS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Log a record in the global queue.
///
/// Once the queue is full, the oldest record is dropped.
pub fn log(record: &log::Record<'_>) {
    let mut logs = logs();
    if logs.len() == logs.capacity() {
        logs.pop_front();
    }
    logs.push_back(Record {
        level: record.level(),
        target: record.target().to_string(),
        message: format!("{}", record.args()),
        time: time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc()),
    });
}

impl log::Log for LayoutLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        log(record);
    }

    fn flush(&self) {}
}

/// Initialize the layout logger.
///
/// Returns an error if another logger was already installed.
pub fn init() -> Result<(), log::SetLoggerError> {
    reserve_logs(1_000);
    log::set_logger(&LOGGER)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

/// Return a logger that stores records in the global queue.
///
/// Useful to combine with another logger; the simpler alternative is
/// [`init()`].
pub fn get_logger() -> LayoutLogger {
    reserve_logs(1_000);
    LayoutLogger
}

/// Adds `n` more entries to the log queue.
///
/// You should call this if you're not using `init()` nor `get_logger()`.
pub fn reserve_logs(n: usize) {
    logs().reserve(n);
}

/// Returns a copy of the records currently in the queue, oldest first.
pub fn records() -> Vec<Record> {
    logs().iter().cloned().collect()
}

/// Empties the queue.
pub fn clear() {
    logs().clear();
}
