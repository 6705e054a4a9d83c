//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use lookup::{DEFAULT_BASE_URL, HttpLookup};

use crate::credentials::CredentialStore;
use crate::{Error, Result};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `IPDATA_API_KEY` — API key, used when `--api-key` is not given
/// - `IPDATA_BASE_URL` — API base URL (default: `"https://api.ipdata.co"`)
/// - `IPDATA_TIMEOUT_SECS` — per-request timeout in seconds (default: `10`)
/// - `HOME` — directory holding the `.ipdata` credential file
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub home: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary variable source.
    pub fn from_source<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            api_key: var("IPDATA_API_KEY").filter(|key| !key.trim().is_empty()),
            base_url: var("IPDATA_BASE_URL").unwrap_or(defaults.base_url),
            timeout: var("IPDATA_TIMEOUT_SECS")
                .and_then(|secs| secs.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            home: var("HOME").filter(|home| !home.is_empty()).map(PathBuf::from),
        }
    }

    /// Returns the credential store in the home directory.
    pub fn credential_store(&self) -> Result<CredentialStore> {
        self.home
            .as_ref()
            .map(CredentialStore::in_home)
            .ok_or(Error::MissingHome)
    }

    /// Picks the API key: the explicit flag first, then `IPDATA_API_KEY`,
    /// then the credential file.
    pub fn resolve_api_key(&self, flag: Option<&str>) -> Result<String> {
        if let Some(key) = flag.or(self.api_key.as_deref()) {
            return Ok(key.to_string());
        }

        let stored = match self.credential_store() {
            Ok(store) => store.load()?,
            Err(Error::MissingHome) => None,
            Err(err) => return Err(err),
        };
        stored.ok_or(Error::MissingApiKey)
    }

    /// Builds the HTTP lookup client for `api_key`.
    pub fn http_lookup(&self, api_key: impl Into<String>) -> Result<HttpLookup> {
        Ok(HttpLookup::builder(api_key)
            .base_url(self.base_url.as_str())
            .timeout(self.timeout)
            .build()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            home: None,
        }
    }
}
