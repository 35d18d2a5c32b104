use log::debug;
use std::io::Write;
use std::path::Path;

use env_logger::{Builder, Env, Target};

use crate::config::LogLevel;
use crate::types::{ErrorKind, ErrorRecord};

/// Environment variable that overrides the configured log level
pub const LOG_ENV: &str = "FINDUPIC_LOG";

/// Initialize the logger with timestamp, log level, and module path.
///
/// Diagnostics go to stderr so they never mix with the report on stdout.
/// `FINDUPIC_LOG` takes precedence over `level` when set.
pub fn init_logger(level: LogLevel) -> Result<(), log::SetLoggerError> {
    Builder::from_env(Env::default().filter_or(LOG_ENV, level.as_str()))
        .target(Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] [{}] - {}",
                buf.timestamp_seconds(),
                record.level(),
                record.module_path().unwrap_or("findupic"),
                record.args()
            )
        })
        .try_init()
}

/// Log a failure recorded during a scan.
///
/// Records reach the user through the error log, so this stays at debug level.
pub fn log_scan_error(record: &ErrorRecord) {
    let stage = match record.kind {
        ErrorKind::Traversal => "Traversal",
        ErrorKind::Open => "Open",
        ErrorKind::Decode => "Decode",
    };
    debug!(
        "{} failed - Path: {}, Error: {}",
        stage,
        record.path.display(),
        record.message
    );
}

/// Log a successfully hashed image
pub fn log_hashed(path: &Path, digest: &dyn std::fmt::Display) {
    debug!("Hashed - Path: {}, Digest: {}", path.display(), digest);
}
