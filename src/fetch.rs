//! HTTP retrieval of record snapshots from the remote document store.
//!
//! The store pushes full snapshots rather than deltas: every fetch
//! returns the complete record collection and the aggregation layer is
//! simply re-run over it.

use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

use crate::parser::parse_records;
use crate::record::MetricRecord;

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response>;
}

pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Self {
        Self(reqwest::Client::new())
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}

pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?;
    Ok(resp.bytes().await?.to_vec())
}

/// Fetches and decodes a full record snapshot from the store.
pub async fn fetch_records<C: HttpClient>(client: &C, url: &str) -> Result<Vec<MetricRecord>> {
    let bytes = fetch_bytes(client, url).await?;
    parse_records(&bytes)
}

/// Like [`fetch_records`], but a failed fetch or decode degrades to an
/// empty collection so the dashboard renders empty charts instead of an
/// error page.
pub async fn fetch_records_or_empty<C: HttpClient>(client: &C, url: &str) -> Vec<MetricRecord> {
    match fetch_records(client, url).await {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "record fetch failed, treating as empty snapshot");
            Vec::new()
        }
    }
}
