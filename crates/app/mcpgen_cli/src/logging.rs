use flexi_logger::{DeferredNow, Logger};
use log::Record;

use crate::Error;

/// Compact CLI log line: `[LEVEL] message`.
fn cli_format(
    w: &mut dyn std::io::Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(w, "[{}] {}", record.level(), record.args())
}

/// Logging for normal commands: stdout.
pub fn init() -> Result<(), Error> {
    Logger::try_with_env_or_str("info")?
        .format(cli_format)
        .log_to_stdout()
        .start()?;

    Ok(())
}

/// Logging for the MCP server: stdout carries the protocol, so diagnostics
/// must go to stderr.
pub fn init_stderr() -> Result<(), Error> {
    Logger::try_with_env_or_str("info")?
        .format(cli_format)
        .log_to_stderr()
        .start()?;

    Ok(())
}
