//! Log setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Picks the filter: `RUST_LOG` first, then the configured directive, then
/// `info`.
#[must_use]
pub fn filter(configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        configured
            .and_then(|directive| EnvFilter::try_new(directive).ok())
            .unwrap_or_else(|| EnvFilter::new("info"))
    })
}

/// Installs a formatting subscriber writing to stderr, so stdout carries
/// only the report. Calling it twice is harmless.
pub fn init(configured: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(configured))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
