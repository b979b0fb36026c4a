use clap::Parser;
use ledgercheck_cli::commands::verify::{self, VerifyArgs};
use ledgercheck_kernel::Digest;
use ledgercheck_node::telemetry;
use ledgercheck_node::{GapPolicy, RetryPolicy, VerifierConfig};
use ledgercheck_store::{CouchConfig, CouchStore, DirStore};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "ledgercheck")]
#[command(about = "Walk a stored ledger history and verify its hash chain", long_about = None)]
struct Cli {
    /// First ledger index to verify. Defaults to the earliest stored ledger.
    start_index: Option<u64>,

    /// Last ledger index. Accepted but not enforced.
    end_index: Option<u64>,

    /// Hex digest of the ledger before the start index
    #[arg(long, env = "LEDGERCHECK_PARENT_HASH")]
    parent_hash: Option<Digest>,

    /// Read ledgers from a directory of `<key>.json` files instead of CouchDB
    #[arg(long, env = "LEDGERCHECK_STORE_DIR")]
    store_dir: Option<PathBuf>,

    #[arg(long, env = "LEDGERCHECK_COUCH_URL", default_value = "http://127.0.0.1:5984")]
    couch_url: String,

    #[arg(long, env = "LEDGERCHECK_COUCH_DATABASE", default_value = "ledgers")]
    couch_database: String,

    #[arg(long, env = "LEDGERCHECK_COUCH_USER")]
    couch_user: Option<String>,

    #[arg(long, env = "LEDGERCHECK_COUCH_PASSWORD", hide_env_values = true)]
    couch_password: Option<String>,

    /// Per-request timeout for CouchDB reads. No timeout when unset.
    #[arg(long, env = "LEDGERCHECK_REQUEST_TIMEOUT_SECS")]
    request_timeout_secs: Option<u64>,

    /// Log a progress line every N ledgers
    #[arg(long, env = "LEDGERCHECK_PROGRESS_INTERVAL", default_value_t = 1000)]
    progress_interval: u64,

    /// Retries for transient read failures
    #[arg(long, env = "LEDGERCHECK_MAX_RETRIES", default_value_t = 0)]
    max_retries: u32,

    /// Initial retry delay, doubled on each attempt
    #[arg(long, env = "LEDGERCHECK_RETRY_BACKOFF_MS", default_value_t = 200)]
    retry_backoff_ms: u64,

    /// Treat a missing ledger followed by a stored one as an error
    #[arg(long, env = "LEDGERCHECK_DETECT_GAPS")]
    detect_gaps: bool,

    /// Serve /health, /status and /metrics on this address while scanning
    #[arg(long, env = "LEDGERCHECK_STATUS_ADDR")]
    status_addr: Option<SocketAddr>,

    /// Print the final report as JSON
    #[arg(long, env = "LEDGERCHECK_JSON")]
    json: bool,
}

impl Cli {
    fn verify_args(&self) -> VerifyArgs {
        let retry = RetryPolicy {
            max_retries: self.max_retries,
            initial_backoff: Duration::from_millis(self.retry_backoff_ms),
            ..RetryPolicy::default()
        };
        VerifyArgs {
            start_index: self.start_index,
            end_index: self.end_index,
            parent_hash: self.parent_hash,
            config: VerifierConfig {
                progress_interval: self.progress_interval,
                retry,
                gap_policy: if self.detect_gaps {
                    GapPolicy::Detect
                } else {
                    GapPolicy::Frontier
                },
                status_addr: self.status_addr,
            },
            json: self.json,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();
    let cli = Cli::parse();
    let args = cli.verify_args();

    let report = match &cli.store_dir {
        Some(dir) => verify::run(DirStore::new(dir), args).await?,
        None => {
            let config = CouchConfig {
                url: cli.couch_url.clone(),
                database: cli.couch_database.clone(),
                username: cli.couch_user.clone(),
                password: cli.couch_password.clone(),
                timeout: cli.request_timeout_secs.map(Duration::from_secs),
            };
            verify::run(CouchStore::new(&config)?, args).await?
        }
    };

    match report.error {
        None => Ok(()),
        Some(e) => Err(anyhow::anyhow!("Scan halted ({}): {}", e.kind(), e)),
    }
}
