//! Google Books provider implementation.
//!
//! Uses the public `volumes` search endpoint. An API key is optional; without
//! one the endpoint applies anonymous quota limits.

use std::fmt;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::config::Config;
use crate::error::{Result, ShelfError};

use super::{CandidateList, CatalogProvider, RawVolumeList};

/// Google Books catalog provider
pub struct GoogleBooksCatalog {
    client: Client,
    base_url: Url,
    api_key: Option<SecretString>,
}

impl fmt::Debug for GoogleBooksCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleBooksCatalog")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl GoogleBooksCatalog {
    /// Create a provider from configuration
    ///
    /// Configures HTTP client with 10s connect timeout and 20s total timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut catalog = Self::new(&config.catalog_url())?;
        catalog.api_key = config.catalog_api_key();
        Ok(catalog)
    }

    /// Create a provider against the given base URL (e.g. `https://www.googleapis.com/books/v1`)
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(20))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: normalize_base(base_url)?,
            api_key: None,
        })
    }

    /// Set the API key sent with each request
    pub fn with_api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Build the search URL for a query
    pub fn search_url(&self, query: &str, limit: usize) -> Result<Url> {
        let mut url = self.base_url.join("volumes")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", query);
            pairs.append_pair("maxResults", &limit.to_string());
            pairs.append_pair("printType", "books");
        }
        Ok(url)
    }
}

/// Ensure the base URL ends with a slash so `join` appends rather than replaces
fn normalize_base(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim_end_matches('/');
    Ok(Url::parse(&format!("{trimmed}/"))?)
}

/// Map a non-success catalog response to an error
fn status_error(status: StatusCode, retry_after: Option<u64>) -> ShelfError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return ShelfError::RateLimited(retry_after.unwrap_or(60));
    }
    ShelfError::Api(format!("Google Books API error: HTTP {status}"))
}

impl CatalogProvider for GoogleBooksCatalog {
    async fn lookup(&self, query: &str, limit: usize) -> Result<CandidateList> {
        let url = self.search_url(query, limit)?;
        tracing::debug!("Catalog lookup for '{}' (limit {})", query, limit);

        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.expose_secret())]);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            return Err(status_error(status, retry_after));
        }

        let body: RawVolumeList = response.json().await?;
        Ok(body.into_candidates())
    }
}
