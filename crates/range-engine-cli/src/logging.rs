//! Stderr logging for the CLI.
//!
//! The core emits `tracing` events; with no `tracing` subscriber installed
//! they are forwarded to `log`, which this logger picks up. Stdout is kept
//! for JSON output only.

use anyhow::Context;
use flexi_logger::{Logger, LoggerHandle};

/// Level used when neither `--log-level` nor `RUST_LOG` is given.
const DEFAULT_LEVEL: &str = "warn";

/// Start the logger. The returned handle must stay alive for the whole run.
///
/// # Errors
///
/// Fails when `level` is not a valid level specification or the logger
/// backend cannot start.
pub fn init(level: Option<&str>) -> anyhow::Result<LoggerHandle> {
    let logger = match level {
        Some(level) => {
            Logger::try_with_str(level).with_context(|| format!("invalid log level `{level}`"))?
        }
        None => Logger::try_with_env_or_str(DEFAULT_LEVEL)
            .context("invalid log level in RUST_LOG")?,
    };
    logger
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .context("failed to start logger")
}
