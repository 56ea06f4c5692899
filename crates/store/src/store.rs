//! Deal store: fetch, atomic replacement, change notification.
//!
//! The store owns the canonical deal collection exclusively. `load_all`
//! and `refresh` swap in a whole new [`Snapshot`] on success and leave
//! the previous one untouched on any failure; individual deals are never
//! patched in place. Snapshot changes are published over a
//! [`tokio::sync::watch`] channel, so consumers always read a stable
//! `Arc` during their own computation.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};

use poolbuy_client::source::DealSource;
use poolbuy_core::deal::{distinct_categories, distinct_distributors, Deal};
use poolbuy_core::notice::{Notice, NoticeBus};
use poolbuy_core::session::SessionContext;

/// Operation label used in notices and logs for the collection fetch.
const FETCH_OPERATION: &str = "fetching deals";

/// One immutable generation of the deal collection.
///
/// `deals` is shared behind an `Arc`: replacing the snapshot is a cheap
/// pointer swap and existing readers keep a consistent view until they
/// drop their clone.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// The full deal collection, in backend display order.
    pub deals: Arc<Vec<Deal>>,
    /// Distinct category labels in the collection, first-occurrence order.
    /// Feeds the filter UI's category selector.
    pub categories: Vec<String>,
    /// Distinct distributor display names, first-occurrence order.
    pub distributors: Vec<String>,
}

impl Snapshot {
    fn build(deals: Vec<Deal>) -> Self {
        let categories = distinct_categories(&deals);
        let distributors = distinct_distributors(&deals);
        Self {
            deals: Arc::new(deals),
            categories,
            distributors,
        }
    }
}

/// Errors raised by the deal store.
///
/// Every variant is also surfaced to the user as a [`Notice`]; callers
/// typically log the error and move on, since the previous snapshot is
/// still valid.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The caller's session does not hold the member role.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The collection fetch failed; the previous snapshot is preserved.
    #[error("Deal fetch failed: {0}")]
    Fetch(String),
}

/// The single authoritative snapshot of all deals visible to the caller.
pub struct DealStore {
    source: Arc<dyn DealSource>,
    session: SessionContext,
    notices: NoticeBus,
    snapshot_tx: watch::Sender<Snapshot>,
    /// True while a fetch is in flight. Distinct from the filter engine's
    /// busy flag, so the UI can tell "fetching fresh deals" apart from
    /// "re-filtering already-fetched deals".
    loading_tx: watch::Sender<bool>,
}

impl DealStore {
    /// Create an empty store for the given caller session.
    pub fn new(source: Arc<dyn DealSource>, session: SessionContext) -> Self {
        let (snapshot_tx, _) = watch::channel(Snapshot::default());
        let (loading_tx, _) = watch::channel(false);
        Self {
            source,
            session,
            notices: NoticeBus::default(),
            snapshot_tx,
            loading_tx,
        }
    }

    /// Fetch the complete deal collection and replace the snapshot.
    ///
    /// Preconditions: the caller must hold a member-role session. A role
    /// violation publishes an authorization notice and aborts without
    /// touching the network.
    ///
    /// On success the whole collection is replaced atomically and the
    /// distinct category / distributor facets are rederived. On failure
    /// the previous snapshot is left untouched and a fetch-failure notice
    /// is published. There is no retry and no backoff.
    pub async fn load_all(&self) -> Result<(), StoreError> {
        if let Err(e) = self.session.require_member() {
            tracing::warn!(error = %e, "Deal fetch blocked by role gate");
            self.notices
                .publish(Notice::authorization(FETCH_OPERATION, e.to_string()));
            return Err(StoreError::Forbidden(e.to_string()));
        }

        self.loading_tx.send_replace(true);
        let result = self.source.fetch_deals().await;
        self.loading_tx.send_replace(false);

        match result {
            Ok(deals) => {
                let snapshot = Snapshot::build(deals);
                tracing::debug!(
                    deals = snapshot.deals.len(),
                    categories = snapshot.categories.len(),
                    distributors = snapshot.distributors.len(),
                    "Deal snapshot replaced",
                );
                self.snapshot_tx.send_replace(snapshot);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Deal fetch failed, keeping previous snapshot");
                self.notices
                    .publish(Notice::fetch_failure(FETCH_OPERATION, e.to_string()));
                Err(StoreError::Fetch(e.to_string()))
            }
        }
    }

    /// Re-fetch the collection in response to a push event.
    ///
    /// Identical contract to [`load_all`](Self::load_all); the distinct
    /// name marks the push-triggered entry point.
    pub async fn refresh(&self) -> Result<(), StoreError> {
        self.load_all().await
    }

    /// The current snapshot. Cheap: the deal collection is shared behind
    /// an `Arc`.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Subscribe to snapshot replacements.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Whether a fetch is currently in flight.
    pub fn is_loading(&self) -> bool {
        *self.loading_tx.borrow()
    }

    /// Subscribe to loading-flag transitions.
    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading_tx.subscribe()
    }

    /// Subscribe to the user-visible notices this store publishes.
    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }
}
