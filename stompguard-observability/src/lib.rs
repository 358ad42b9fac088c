pub mod tracing;

pub use self::tracing::{init_tracing, TracingConfig};

/// Minimal logging setup with an `info` default and no target prefixes
pub fn init_minimal_logging() -> Result<(), anyhow::Error> {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init()?;
    Ok(())
}
