//! Telemetry helpers for hosts embedding `thermostat-rs`.
//!
//! The card only emits `tracing` events (reconciliation decisions, dispatched
//! commands, rescale scheduling). Hosts either call one of the helpers below or
//! install their own subscriber and filters.

/// Installs a compact `tracing` subscriber filtered by `RUST_LOG`, or `info`
/// when the variable is unset.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_default_directives("info")
}

/// Same as [`init_default_tracing`] with caller-provided fallback directives,
/// e.g. `"thermostat_rs=debug"` while diagnosing a card.
#[must_use]
pub fn init_tracing_with_default_directives(directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directives));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directives;
        false
    }
}
