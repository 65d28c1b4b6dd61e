use std::str::FromStr;

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(anyhow!("LOG_FORMAT must be 'compact' or 'json', got '{other}'")),
        }
    }
}

/// `level` is the directive already resolved by `Settings` (`LOG_LEVEL`, then
/// `RUST_LOG`, then `info`); the environment is not consulted again here.
pub fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let filter = build_filter(level)?;

    let builder = fmt().with_env_filter(filter).with_target(true);
    let result = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().flatten_event(true).try_init(),
    };

    result.map_err(|e| anyhow!("failed to init logging: {e}"))
}

fn build_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).map_err(|e| anyhow!("invalid log level '{level}': {e}"))
}
