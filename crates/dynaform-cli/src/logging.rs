use anyhow::Result;
use twyg::{LogLevel, OptsBuilder};

use crate::config::Config;

/// Map a configured level name onto twyg's levels.
pub fn parse_level(level: &str) -> Result<LogLevel> {
    match level.to_ascii_lowercase().as_str() {
        "trace" => Ok(LogLevel::Trace),
        "debug" => Ok(LogLevel::Debug),
        "info" => Ok(LogLevel::Info),
        "warn" | "warning" => Ok(LogLevel::Warn),
        "error" => Ok(LogLevel::Error),
        other => anyhow::bail!(
            "Unknown log level: {}\n\nValid levels: trace, debug, info, warn, error",
            other
        ),
    }
}

/// Install twyg as the global logger.
pub fn setup(config: &Config) -> Result<()> {
    let opts = OptsBuilder::new()
        .coloured(config.log_coloured)
        .level(parse_level(&config.log_level)?)
        .report_caller(false)
        .build()
        .map_err(|e| anyhow::anyhow!("Invalid logging options: {:?}", e))?;

    twyg::setup(opts).map_err(|e| anyhow::anyhow!("Could not set up logging: {:?}", e))?;
    Ok(())
}
