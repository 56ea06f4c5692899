//! REST client for the marketplace backend.
//!
//! Wraps the endpoints the deal browser reads (deal collection,
//! favorites, commitments) using [`reqwest`]. The session id is attached
//! to every request as an `x-session-id` header; the backend scopes the
//! returned data to that session's role.

use poolbuy_core::deal::Deal;
use poolbuy_core::types::DealId;

/// Header carrying the caller's opaque session identifier.
const SESSION_HEADER: &str = "x-session-id";

/// HTTP client for the marketplace backend.
pub struct MarketApi {
    client: reqwest::Client,
    api_url: String,
    session_id: String,
}

/// Errors from the backend REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl MarketApi {
    /// Create a new API client.
    ///
    /// * `api_url`    - base HTTP URL, e.g. `http://host:4000/api`.
    /// * `session_id` - opaque session identifier for the current caller.
    pub fn new(api_url: String, session_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            session_id,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling).
    pub fn with_client(client: reqwest::Client, api_url: String, session_id: String) -> Self {
        Self {
            client,
            api_url,
            session_id,
        }
    }

    /// Fetch the complete deal collection visible to the current caller.
    ///
    /// Sends `GET /deals`. The backend returns the deals in display
    /// order; that ordering is preserved all the way to the filtered
    /// view.
    pub async fn list_deals(&self) -> Result<Vec<Deal>, ApiError> {
        let response = self
            .client
            .get(format!("{}/deals", self.api_url))
            .header(SESSION_HEADER, &self.session_id)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the ids of deals the current caller has favorited.
    ///
    /// Sends `GET /favorites`.
    pub async fn list_favorites(&self) -> Result<Vec<DealId>, ApiError> {
        let response = self
            .client
            .get(format!("{}/favorites", self.api_url))
            .header(SESSION_HEADER, &self.session_id)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the ids of deals the current caller has an active commitment
    /// against.
    ///
    /// Sends `GET /commitments`.
    pub async fn list_commitments(&self) -> Result<Vec<DealId>, ApiError> {
        let response = self
            .client
            .get(format!("{}/commitments", self.api_url))
            .header(SESSION_HEADER, &self.session_id)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ApiError::Api`] containing
    /// the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
