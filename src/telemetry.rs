//! Telemetry initialization: structured logging via tracing-subscriber.
//!
//! Log filtering is controlled by `RUST_LOG` (standard `EnvFilter` syntax),
//! defaulting to `info` when unset. Repository methods are instrumented with
//! `#[tracing::instrument]`, so per-query spans carry entity ids and errors.

use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize the global tracing subscriber (fmt output + env filter).
pub fn init_telemetry() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    info!("Telemetry initialized");

    Ok(())
}
