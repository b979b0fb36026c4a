use ledgercheck_node::{HaltKind, ScanState, Supervisor, VerifierConfig};
use ledgercheck_store::fixtures::generate_chain;
use ledgercheck_store::MemoryStore;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that keeps formatted log output in memory
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn lines(&self) -> Vec<String> {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).lines().map(str::to_string).collect()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` on a fresh runtime with log output captured at info level.
fn with_tracing<F, Fut>(f: F) -> (Vec<String>, Fut::Output)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future,
{
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(f())
    });

    (logs.lines(), result)
}

fn has_field(line: &str, name: &str, value: &str) -> bool {
    line.contains(&format!("{}={}", name, value)) || line.contains(&format!("{}=\"{}\"", name, value))
}

#[test]
fn test_chain_break_logs_one_error_event() {
    let records = generate_chain(0, 12).unwrap();
    let store = MemoryStore::from_records(&records).unwrap();
    let mut broken = records[6].clone();
    broken.parent_hash = Some(records[2].ledger_hash);
    store.insert_record(&broken).unwrap();

    let (lines, report) = with_tracing(|| async move {
        Supervisor::new(store, VerifierConfig::default()).run(0, None).await
    });
    assert_eq!(report.state, ScanState::HaltedError(HaltKind::Chain));

    let errors: Vec<&String> = lines.iter().filter(|line| line.contains("ERROR")).collect();
    assert_eq!(errors.len(), 1, "logs: {:#?}", lines);
    assert!(has_field(errors[0], "index", "6"), "{}", errors[0]);
    assert!(has_field(errors[0], "invariant", "chain"), "{}", errors[0]);
}

#[test]
fn test_tx_tamper_error_names_txhash_invariant() {
    let records = generate_chain(0, 5).unwrap();
    let store = MemoryStore::from_records(&records).unwrap();
    let mut tampered = records[3].clone();
    tampered.tx_hash = records[2].tx_hash;
    store.insert_record(&tampered).unwrap();

    let (lines, _) = with_tracing(|| async move {
        Supervisor::new(store, VerifierConfig::default()).run(0, None).await
    });

    let errors: Vec<&String> = lines.iter().filter(|line| line.contains("ERROR")).collect();
    assert_eq!(errors.len(), 1, "logs: {:#?}", lines);
    assert!(has_field(errors[0], "index", "3"), "{}", errors[0]);
    assert!(has_field(errors[0], "invariant", "txhash"), "{}", errors[0]);
}

#[test]
fn test_clean_scan_logs_progress_every_interval() {
    let records = generate_chain(0, 25).unwrap();
    let store = MemoryStore::from_records(&records).unwrap();
    let config = VerifierConfig {
        progress_interval: 10,
        ..VerifierConfig::default()
    };

    let (lines, report) = with_tracing(|| async move {
        Supervisor::new(store, config).run(0, None).await
    });
    assert!(report.is_success());

    let progress: Vec<&String> = lines.iter().filter(|line| line.contains("Verified ledger")).collect();
    assert_eq!(progress.len(), 3, "logs: {:#?}", lines);
    for (line, index) in progress.iter().zip(["0", "10", "20"]) {
        assert!(has_field(line, "index", index), "{}", line);
        assert!(line.contains("time="), "{}", line);
    }
    assert!(!lines.iter().any(|line| line.contains("ERROR")));
}
