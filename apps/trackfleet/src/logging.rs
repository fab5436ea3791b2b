use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cli::LogFormat;

/// Install the global subscriber.  `RUST_LOG` wins over `level`.
pub fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => subscriber
            .with(fmt::layer().json())
            .try_init()
            .map_err(|e| anyhow!("failed to init logging: {e}"))?,
        LogFormat::Text => subscriber
            .with(fmt::layer().with_target(false))
            .try_init()
            .map_err(|e| anyhow!("failed to init logging: {e}"))?,
    }
    Ok(())
}
