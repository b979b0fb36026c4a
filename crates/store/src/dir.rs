//! Directory-backed store: one `<key>.json` file per ledger document.

use crate::error::Result;
use crate::key::index_key;
use crate::store::{encode_record, DocumentStore};
use ledgercheck_kernel::LedgerRecord;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    /// Write `record` under its own index key, replacing any existing file.
    pub async fn put_record(&self, record: &LedgerRecord) -> Result<()> {
        self.put_raw(&index_key(record.index), &encode_record(record)?).await
    }

    pub async fn put_raw(&self, key: &str, bytes: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.path_for(key), bytes).await?;
        Ok(())
    }

    /// All document keys, sorted.
    async fn keys(&self) -> Result<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(root = %self.root.display(), "Store directory does not exist");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

impl DocumentStore for DirStore {
    async fn list_earliest(&self, limit: usize) -> Result<Vec<String>> {
        let mut keys = self.keys().await?;
        keys.truncate(limit);
        Ok(keys)
    }

    async fn list_from(&self, start_key: &str, limit: usize) -> Result<Vec<String>> {
        let keys = self.keys().await?;
        Ok(keys
            .into_iter()
            .filter(|key| key.as_str() >= start_key)
            .take(limit)
            .collect())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
