//! The deal-fetch seam.
//!
//! The deal store depends on [`DealSource`] rather than on [`MarketApi`]
//! directly, so component tests can inject a scripted fake backend.

use async_trait::async_trait;
use poolbuy_core::deal::Deal;

use crate::api::{ApiError, MarketApi};

/// Anything that can produce the caller's complete deal collection.
#[async_trait]
pub trait DealSource: Send + Sync {
    /// Fetch the full, ordered deal collection for the current caller.
    async fn fetch_deals(&self) -> Result<Vec<Deal>, ApiError>;
}

#[async_trait]
impl DealSource for MarketApi {
    async fn fetch_deals(&self) -> Result<Vec<Deal>, ApiError> {
        self.list_deals().await
    }
}
