//! CouchDB-compatible HTTP store.
//!
//! Listing uses `GET /{db}/_all_docs?limit=N[&startkey="K"]`, documents are
//! read with `GET /{db}/{key}`. A 404 on a document is "no such ledger",
//! any other non-success status is an error.

use crate::error::{Result, StoreError};
use crate::store::DocumentStore;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CouchConfig {
    pub url: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for CouchConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:5984".to_string(),
            database: "ledgers".to_string(),
            username: None,
            password: None,
            timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CouchStore {
    db_url: String,
    client: Client,
    credentials: Option<(String, Option<String>)>,
}

#[derive(Deserialize)]
struct AllDocs {
    rows: Vec<AllDocsRow>,
}

#[derive(Deserialize)]
struct AllDocsRow {
    id: String,
}

impl CouchStore {
    pub fn new(config: &CouchConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let db_url = format!("{}/{}", config.url.trim_end_matches('/'), config.database);
        tracing::info!(db = %db_url, auth = config.username.is_some(), "Using CouchDB store");

        Ok(Self {
            db_url,
            client,
            credentials: config
                .username
                .clone()
                .map(|user| (user, config.password.clone())),
        })
    }

    pub fn db_url(&self) -> &str {
        &self.db_url
    }

    fn request(&self, url: &str) -> RequestBuilder {
        let req = self.client.get(url);
        match &self.credentials {
            Some((user, password)) => req.basic_auth(user, password.as_ref()),
            None => req,
        }
    }

    async fn all_docs(&self, start_key: Option<&str>, limit: usize) -> Result<Vec<String>> {
        let url = format!("{}/_all_docs", self.db_url);
        let mut query = vec![("limit", limit.to_string())];
        if let Some(key) = start_key {
            // startkey is a JSON value, so the key goes in quoted
            let encoded = serde_json::to_string(key)
                .map_err(|_| StoreError::InvalidKey(key.to_string()))?;
            query.push(("startkey", encoded));
        }

        let resp = self.request(&url).query(&query).send().await?;
        if !resp.status().is_success() {
            return Err(StoreError::Status {
                status: resp.status().as_u16(),
                url,
            });
        }

        let page: AllDocs = resp.json().await?;
        Ok(page.rows.into_iter().map(|row| row.id).collect())
    }
}

impl DocumentStore for CouchStore {
    async fn list_earliest(&self, limit: usize) -> Result<Vec<String>> {
        self.all_docs(None, limit).await
    }

    async fn list_from(&self, start_key: &str, limit: usize) -> Result<Vec<String>> {
        self.all_docs(Some(start_key), limit).await
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let url = format!("{}/{}", self.db_url, key);
        let resp = self.request(&url).send().await?;

        match resp.status() {
            StatusCode::NOT_FOUND => {
                tracing::debug!(key, "No document");
                Ok(None)
            }
            status if status.is_success() => Ok(Some(resp.bytes().await?.to_vec())),
            status => Err(StoreError::Status {
                status: status.as_u16(),
                url,
            }),
        }
    }
}
