use log::{LevelFilter, SetLoggerError};
use simple_logger::SimpleLogger;

/// Pick the level for the given verbosity
pub fn log_level(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initialize logging with the specified level.
///
/// Fails if a logger is already installed in this process.
pub fn init_logging(debug: bool) -> Result<LevelFilter, SetLoggerError> {
    let level = log_level(debug);

    SimpleLogger::new().with_level(level).init()?;

    Ok(level)
}
