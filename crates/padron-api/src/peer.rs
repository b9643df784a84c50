//! Outbound HTTP client for the sibling instance's `/ping` route.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PeerError {
  #[error("{0}")]
  Request(#[from] reqwest::Error),
}

/// What the peer answered.
#[derive(Debug, Clone)]
pub struct PeerReply {
  pub status: u16,
  pub body:   Value,
}

/// Client for one peer instance, with a hard per-request timeout.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct PeerClient {
  client: Client,
  host:   String,
  port:   u16,
}

impl PeerClient {
  pub fn new(
    host: impl Into<String>,
    port: u16,
    timeout: Duration,
  ) -> Result<Self, PeerError> {
    let client = Client::builder().timeout(timeout).build()?;
    Ok(Self { client, host: host.into(), port })
  }

  /// `host:port` of the peer.
  pub fn target(&self) -> String { format!("{}:{}", self.host, self.port) }

  fn url(&self, path: &str) -> String {
    format!("http://{}{}", self.target(), path)
  }

  /// `GET http://<peer>/ping`. The body must be JSON.
  pub async fn ping(&self) -> Result<PeerReply, PeerError> {
    let resp = self.client.get(self.url("/ping")).send().await?;
    let status = resp.status().as_u16();
    let body = resp.json().await?;
    Ok(PeerReply { status, body })
  }
}
