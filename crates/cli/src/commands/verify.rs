use anyhow::Context;
use ledgercheck_kernel::Digest;
use ledgercheck_node::server;
use ledgercheck_node::telemetry;
use ledgercheck_node::{resolve_start, ScanReport, ScanStatus, Supervisor, VerifierConfig};
use ledgercheck_store::DocumentStore;
use tokio::sync::watch;

#[derive(Debug, Clone, Default)]
pub struct VerifyArgs {
    /// First ledger to verify; the store's earliest ledger when absent.
    pub start_index: Option<u64>,
    /// Accepted but not enforced.
    pub end_index: Option<u64>,
    /// Digest of the ledger before the start, if known.
    pub parent_hash: Option<Digest>,
    pub config: VerifierConfig,
    pub json: bool,
}

/// Resolve the start, scan to the end of the chain and print the result.
///
/// Only a failure to resolve the start is an `Err`; a halted scan is
/// reported through the returned [`ScanReport`].
pub async fn run<S: DocumentStore>(store: S, args: VerifyArgs) -> anyhow::Result<ScanReport> {
    let start = match resolve_start(&store, args.start_index).await {
        Ok(start) => start,
        Err(e) => {
            tracing::error!(invariant = "resolution", error = %e, "Cannot determine where to start");
            return Err(e).context("Cannot determine where to start");
        }
    };

    tracing::info!(start, "Starting from index {}", start);
    if let Some(end) = args.end_index {
        tracing::warn!(end, "End index is not enforced, scanning to the end of the chain");
    }

    let mut supervisor = Supervisor::new(store, args.config.clone());

    if let Some(addr) = args.config.status_addr {
        let (tx, rx) = watch::channel(ScanStatus::pending(start));
        let metrics = match telemetry::install_metrics() {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!("Metrics unavailable: {}", e);
                None
            }
        };
        let app = server::build_router(rx, metrics);
        tokio::spawn(async move {
            if let Err(e) = server::serve(addr, app).await {
                tracing::error!("Status endpoint failed: {}", e);
            }
        });
        supervisor = supervisor.with_progress(tx);
    }

    let report = supervisor.run(start, args.parent_hash).await;
    print_report(&report, args.json)?;
    Ok(report)
}

fn print_report(report: &ScanReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&report.to_json())?);
        return Ok(());
    }

    let proof = &report.proof;
    match &report.error {
        None => println!("\n✅ CHAIN VERIFIED\n"),
        Some(e) => {
            println!("\n❌ HALTED ({})\n", e.kind());
            println!("Reason:        {}", e);
        }
    }
    println!("Start index:   {}", proof.start_index);
    println!("Verified:      {}", proof.verified_count);
    match (proof.last_verified_index, &proof.last_verified_hash) {
        (Some(index), Some(hash)) => println!("Last ledger:   {} ({})", index, hash),
        _ => println!("Last ledger:   -"),
    }
    println!("Anchored:      {}", if proof.anchored { "yes" } else { "no" });
    println!("Run digest:    {}\n", proof.run_digest);
    Ok(())
}
