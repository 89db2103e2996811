//! Structured logging configuration.
//!
//! The library logs through the `log` facade; `init` installs a
//! `tracing` subscriber that also captures those records.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging, filtered by `RUST_LOG` (default `info`)
///
/// # Example
///
/// ```ignore
/// logging::init();
/// tracing::info!("Host starting");
/// ```
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true);

    // `init` also installs the `log` bridge, so `holdem_round` records
    // reach this subscriber.
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::debug!("Structured logging initialized");
}

/// Log how one table finished
pub fn log_table_summary(table: &str, rounds: usize, chips: u32, elapsed_ms: u128) {
    tracing::info!(
        table = table,
        rounds = rounds,
        chips = chips,
        elapsed_ms = elapsed_ms as u64,
        "Table finished"
    );
}
