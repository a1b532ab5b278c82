//! Feed client — fetches the public transient-link signature feed.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::error::FeedError;

/// Default public feed endpoint.
pub const DEFAULT_FEED_URL: &str = "https://api.eve-scout.com/v2/public/signatures";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// One raw feed record.
///
/// Endpoint names and signature fields are optional — the feed publishes
/// half-scanned entries; records missing an endpoint are skipped during
/// normalization rather than failing the fetch.  Timestamps are absolute
/// RFC 3339.
#[derive(Clone, Debug, Deserialize)]
pub struct FeedSignature {
    #[serde(default)]
    pub in_system_name: Option<String>,
    #[serde(default)]
    pub out_system_name: Option<String>,
    #[serde(default)]
    pub in_signature: Option<String>,
    #[serde(default)]
    pub out_signature: Option<String>,
    #[serde(default)]
    pub wh_type: Option<String>,
    #[serde(default)]
    pub max_ship_size: Option<String>,
    #[serde(default)]
    pub created_by_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Source of feed records.  The refresher is generic over this so tests can
/// inject canned polls; production uses [`HttpFeedClient`].
pub trait FeedClient: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<Vec<FeedSignature>, FeedError>> + Send;
}

/// HTTP implementation over `reqwest`.
pub struct HttpFeedClient {
    client: reqwest::Client,
    url: String,
}

impl HttpFeedClient {
    /// Client for the default public feed.
    pub fn new() -> Result<Self, FeedError> {
        Self::with_url(DEFAULT_FEED_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self { client, url: url.into() })
    }
}

impl FeedClient for HttpFeedClient {
    async fn fetch(&self) -> Result<Vec<FeedSignature>, FeedError> {
        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::Status(response.status()));
        }

        // Deserialize per record so one malformed entry drops that entry,
        // not the poll.
        let raw: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| FeedError::Parse(e.to_string()))?;

        let mut records = Vec::with_capacity(raw.len());
        for value in raw {
            match serde_json::from_value::<FeedSignature>(value) {
                Ok(sig) => records.push(sig),
                Err(e) => debug!(error = %e, "skipping malformed feed record"),
            }
        }
        Ok(records)
    }
}
