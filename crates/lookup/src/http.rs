//! HTTP client for the ipdata API.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use common::{Record, Value};
use reqwest::StatusCode;

use crate::client::Lookup;
use crate::{LookupError, Result};

/// Base URL of the public ipdata API.
pub const DEFAULT_BASE_URL: &str = "https://api.ipdata.co";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Looks addresses up against the ipdata HTTP API.
///
/// Issues `GET {base_url}/{address}?api-key={key}`, or `GET {base_url}/` for
/// the caller's own address, and records the HTTP status in the returned
/// record's `status` field.
#[derive(Debug, Clone)]
pub struct HttpLookup {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpLookup {
    /// Creates a client for the public API with default settings.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    /// Returns a builder for customizing the base URL and timeout.
    pub fn builder(api_key: impl Into<String>) -> HttpLookupBuilder {
        HttpLookupBuilder {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, address: Option<&str>) -> Result<String> {
        match address {
            Some(address) => {
                let ip: IpAddr = address
                    .parse()
                    .map_err(|_| LookupError::InvalidAddress(address.to_string()))?;
                Ok(format!("{}/{}", self.base_url, ip))
            }
            None => Ok(format!("{}/", self.base_url)),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn request(&self, url: &str) -> Result<Record> {
        let response = self
            .client
            .get(url)
            .query(&[("api-key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "lookup response");

        if !status.is_success() {
            return Err(upstream_error(status, &body));
        }

        let mut record: Record = serde_json::from_slice(&body)?;
        record.insert("status", status.as_u16());
        Ok(record)
    }
}

#[async_trait]
impl Lookup for HttpLookup {
    async fn fetch(&self, address: Option<&str>) -> Result<Record> {
        let url = self.url_for(address)?;
        self.request(&url).await
    }
}

/// Builds the error for a non-success response, preferring the API's
/// `message` field over the raw body.
fn upstream_error(status: StatusCode, body: &[u8]) -> LookupError {
    let message = serde_json::from_slice::<Record>(body)
        .ok()
        .and_then(|record| record.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| {
            let text = String::from_utf8_lossy(body).trim().to_string();
            if text.is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                text
            }
        });

    LookupError::Upstream {
        status: status.as_u16(),
        message,
    }
}

/// Builder for [`HttpLookup`].
#[derive(Debug, Clone)]
pub struct HttpLookupBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl HttpLookupBuilder {
    /// Sets the API base URL. A trailing `/` is ignored.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<HttpLookup> {
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;
        Ok(HttpLookup {
            client,
            base_url: self.base_url,
            api_key: self.api_key,
        })
    }
}
