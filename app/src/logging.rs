//! FILENAME: app/src/logging.rs
// PURPOSE: Unified logging backend for the `log` facade.
// FORMAT: seq|level|category|message

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use once_cell::sync::Lazy;

/// Environment variable overriding the log level, e.g. `debug`.
pub const LOG_ENV: &str = "RETAIL_REPORT_LOG";

/// Global sequence counter; every line gets the next number.
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

/// Optional mirror of the stderr output.
pub static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

static LOGGER: UnifiedLogger = UnifiedLogger;

pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

/// One-letter level code used in the log line.
pub fn level_code(level: Level) -> &'static str {
    match level {
        Level::Error => "E",
        Level::Warn => "W",
        Level::Info => "I",
        Level::Debug => "D",
        Level::Trace => "T",
    }
}

pub fn format_line(seq: u64, level: &str, category: &str, message: &str) -> String {
    format!("{}|{}|{}|{}", seq, level, category, message)
}

/// Truncates (or creates) `path` and mirrors every following line into it.
pub fn init_log_file(path: &Path) -> Result<(), String> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| format!("Failed to create log file {:?}: {}", path, e))?;

    let mut guard = LOG_FILE.lock().map_err(|e| format!("Lock error: {}", e))?;
    *guard = Some(file);
    Ok(())
}

/// Writes one line in unified format to stderr and the log file, if any.
pub fn write_log(level: &str, category: &str, message: &str) {
    let line = format_line(next_seq(), level, category, message);

    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(ref mut file) = *guard {
            if let Err(e) = writeln!(file, "{}", line) {
                eprintln!("[LOG_ERROR] Failed to write: {}", e);
            }
            let _ = file.flush();
        }
    }

    eprintln!("{}", line);
}

struct UnifiedLogger;

impl Log for UnifiedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            write_log(level_code(record.level()), record.target(), &record.args().to_string());
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = LOG_FILE.lock() {
            if let Some(ref mut file) = *guard {
                let _ = file.flush();
            }
        }
    }
}

/// Level from `RETAIL_REPORT_LOG` when set and valid, otherwise from the
/// number of `--verbose` flags: none is info, one debug, more trace.
pub fn resolve_level(verbose: u8) -> LevelFilter {
    if let Ok(value) = std::env::var(LOG_ENV) {
        if let Ok(level) = value.parse::<LevelFilter>() {
            return level;
        }
        eprintln!("[LOG_WARN] Ignoring invalid {}={}", LOG_ENV, value);
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the unified logger. Fails if a logger is already installed.
pub fn init(level: LevelFilter, log_file: Option<&Path>) -> Result<(), String> {
    if let Some(path) = log_file {
        init_log_file(path)?;
    }
    log::set_logger(&LOGGER).map_err(|e| format!("Logger already installed: {}", e))?;
    log::set_max_level(level);
    Ok(())
}
