pub mod config;
pub mod error;

pub use config::{
    CacheConfig, Config, ConfigValidationError, LoggingConfig, ValidationResult, WeatherConfig,
};
pub use error::{AppError, ConfigError, NetworkError, ReqwestErrorExt};

use anyhow::Result;

/// Initialize logging.
///
/// `RUST_LOG` wins over `default_directive`. Output goes to stderr so it never
/// interleaves with the rendered view on stdout.
pub fn init(default_directive: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!("Statecast core initialized");
    Ok(())
}
