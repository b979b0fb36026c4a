// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_LOG_FILTER: &str = "ledgercheck_node=info,ledgercheck_cli=info,ledgercheck_store=info";

pub const RECORDS_VERIFIED: &str = "ledgercheck_records_verified_total";
pub const LAST_VERIFIED_INDEX: &str = "ledgercheck_last_verified_index";
pub const FETCH_RETRIES: &str = "ledgercheck_fetch_retries_total";
pub const SCAN_HALTS: &str = "ledgercheck_scan_halts_total";

/// Install the fmt subscriber, filtered by `RUST_LOG`. Call once at startup.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Install the Prometheus recorder and describe the scan metrics.
pub fn install_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    metrics::describe_counter!(RECORDS_VERIFIED, "Ledgers that passed linkage and transaction checks");
    metrics::describe_gauge!(LAST_VERIFIED_INDEX, "Index of the last verified ledger");
    metrics::describe_counter!(FETCH_RETRIES, "Store reads retried after a transient failure");
    metrics::describe_counter!(SCAN_HALTS, "Scans halted on an error, by kind");

    metrics::gauge!("ledgercheck_up", 1.0);
    Ok(handle)
}
