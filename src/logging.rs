#![cfg(feature = "std")]

use log::{LevelFilter, Log, Metadata, Record};

/// Environment variable holding the log level (`error` .. `trace`, or `off`).
pub const LOG_ENV_VAR: &str = "BATTLESHIP_ENV_LOG";

/// Writes records from this crate to stderr; other targets only at `warn`
/// and above.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > log::max_level() {
            return false;
        }
        metadata.target().starts_with(env!("CARGO_CRATE_NAME")) || metadata.level() <= log::Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{:<5} {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Level named by [`LOG_ENV_VAR`], or `default` when unset or unparsable.
pub fn level_from_env(default: LevelFilter) -> LevelFilter {
    std::env::var(LOG_ENV_VAR)
        .ok()
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(default)
}

/// Install the stderr logger at `level`. A second call only adjusts the level.
pub fn init_logging_with(level: LevelFilter) {
    // set_logger fails once a logger is installed; the level still applies
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Install the stderr logger at the level from [`LOG_ENV_VAR`], `info` by
/// default.
pub fn init_logging() {
    init_logging_with(level_from_env(LevelFilter::Info));
}
