//! File-based logging bootstrap.
//!
//! The terminal belongs to the UI, so log records go to a rotating file in
//! the data directory. Initialization is idempotent and never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use std::path::Path;
use std::sync::OnceLock;

const LOG_FILE_BASENAME: &str = "weekplan";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGER: OnceLock<LoggerHandle> = OnceLock::new();

/// Start logging to `<log_dir>/weekplan.log` at `level`.
///
/// Returns a human-readable error when the level is unsupported or the
/// backend fails to start. Repeated calls after a successful start are no-ops.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), String> {
    if LOGGER.get().is_some() {
        return Ok(());
    }

    let level = normalize_level(level)?;
    let handle = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME)
                .suppress_timestamp(),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    // A racing initializer may have won; its handle stays active
    let _ = LOGGER.set(handle);

    info!(
        "event=app_start module=core status=ok version={} level={}",
        env!("CARGO_PKG_VERSION"),
        level
    );
    Ok(())
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error|off"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_level() {
        assert_eq!(normalize_level(" INFO "), Ok("info"));
        assert_eq!(normalize_level("warning"), Ok("warn"));
        assert!(normalize_level("loud").is_err());
    }
}
