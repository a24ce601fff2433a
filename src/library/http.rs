//! HTTP client for the library backend.
//!
//! # Security Note - Logging
//!
//! The bearer token is attached as a header marked sensitive, so reqwest and
//! http omit its value from `Debug` output even when debug logging is on.

use std::fmt;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, header};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::error::{Result, ShelfError};

use super::{LibraryBackend, NewBook, OwnedItem};

/// Error body returned by the backend: `{ "error": "<message>" }`
#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    error: String,
}

/// Library backend reached over HTTP
pub struct HttpLibrary {
    client: Client,
    base_url: Url,
    token: SecretString,
}

impl fmt::Debug for HttpLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpLibrary")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl HttpLibrary {
    /// Create a client from configuration
    ///
    /// Configures HTTP client with 10s connect timeout and 30s total timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        let token = config.token().ok_or_else(|| {
            ShelfError::Auth(
                "Library token not configured. Set SHELFNOTE_TOKEN environment variable or run: shelfnote config set auth.token <token>".to_string()
            )
        })?;

        Self::new(&config.api_url(), token)
    }

    pub fn new(api_url: &str, token: SecretString) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let trimmed = api_url.trim_end_matches('/');
        let base_url = Url::parse(&format!("{trimmed}/"))?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    fn books_url(&self) -> Result<Url> {
        Ok(self.base_url.join("books")?)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let mut value =
            header::HeaderValue::from_str(&format!("Bearer {}", self.token.expose_secret()))
                .map_err(|_| ShelfError::Auth("token contains invalid characters".to_string()))?;
        value.set_sensitive(true);
        Ok(request.header(header::AUTHORIZATION, value))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(backend_error(status, &body))
    }
}

/// Reshape a failed backend response into an error carrying its message
fn backend_error(status: StatusCode, body: &str) -> ShelfError {
    let message = serde_json::from_str::<BackendErrorBody>(body)
        .map(|b| b.error)
        .ok()
        .filter(|m| !m.trim().is_empty());

    match (status, message) {
        (StatusCode::UNAUTHORIZED, message) => ShelfError::Auth(
            message.unwrap_or_else(|| "library backend rejected the token".to_string()),
        ),
        (_, Some(message)) => ShelfError::Backend(message),
        (status, None) => ShelfError::Backend(format!(
            "library request failed: HTTP {}",
            status
        )),
    }
}

impl LibraryBackend for HttpLibrary {
    async fn list_owned(&self) -> Result<Vec<OwnedItem>> {
        let request = self.authorized(self.client.get(self.books_url()?))?;
        let response = request.send().await?;
        Self::read_json(response).await
    }

    async fn create_owned(&self, book: NewBook) -> Result<OwnedItem> {
        tracing::debug!("Creating owned book for '{}'", book.external_id);
        let request = self.authorized(self.client.post(self.books_url()?).json(&book))?;
        let response = request.send().await?;
        Self::read_json(response).await
    }
}
