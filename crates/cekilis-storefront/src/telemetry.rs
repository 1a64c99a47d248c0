use cekilis_core::{Error, Result, ENV_CEKILIS_LOG_JSON, ENV_CEKILIS_LOG_LEVEL};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Logs go to stderr so stdout stays
/// machine-readable.
///
/// `CEKILIS_LOG_LEVEL` takes precedence over `RUST_LOG`, and both over
/// `default_level`. `CEKILIS_LOG_JSON` (or `force_json`) selects JSON lines.
pub fn init_tracing(force_json: bool, default_level: &str) -> Result<()> {
    let filter = std::env::var(ENV_CEKILIS_LOG_LEVEL)
        .ok()
        .and_then(|level| EnvFilter::try_new(level).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default_level));
    let json = force_json || env_flag(ENV_CEKILIS_LOG_JSON);
    let registry = tracing_subscriber::registry().with(filter);
    let installed = if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    installed.map_err(|e| Error::Config(format!("tracing subscriber init failed: {e}")))
}

fn env_flag(name: &str) -> bool {
    matches!(
        std::env::var(name).ok().as_deref(),
        Some("1" | "true" | "TRUE" | "yes" | "YES")
    )
}
