//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber.
///
/// Compact console output without module targets. The level comes from
/// `RUST_LOG` and defaults to `info`. Call once per process.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    // The only test in the crate that installs a global subscriber.
    #[test]
    fn installs_global_subscriber() {
        init();
        assert!(tracing::dispatcher::has_been_set());
    }
}
