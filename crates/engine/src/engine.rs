//! The filter engine.
//!
//! Owns [`FilterCriteria`] plus the caller's favorites and commitments id
//! sets, and derives the filtered deal view as a pure function of those
//! and the store snapshot. Recomputation is debounced: a burst of
//! criteria edits (typing, slider drags) or snapshot swaps produces a
//! single filter pass reflecting the final state of the burst.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio_util::sync::CancellationToken;

use poolbuy_core::criteria::{Criterion, FilterCriteria};
use poolbuy_core::deal::Deal;
use poolbuy_core::filter::filter_deals;
use poolbuy_core::types::DealId;
use poolbuy_store::DealStore;

use crate::debounce::Debouncer;

/// Quiescence window before a scheduled recomputation runs.
const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Derives the filtered, ordered deal view from the store snapshot and
/// the current criteria.
///
/// The engine never mutates the store; the store never reads the
/// criteria. The computed view replaces the previous one wholesale.
pub struct FilterEngine {
    store: Arc<DealStore>,
    criteria: RwLock<FilterCriteria>,
    favorites: RwLock<HashSet<DealId>>,
    commitments: RwLock<HashSet<DealId>>,
    view_tx: watch::Sender<Arc<Vec<Deal>>>,
    /// True from the moment a recomputation is scheduled until one
    /// completes. Distinct from the store's loading flag: this means
    /// "re-filtering already-fetched deals", not "fetching fresh deals".
    busy_tx: watch::Sender<bool>,
    debouncer: Debouncer,
}

impl FilterEngine {
    /// Create an engine over `store` with the production debounce window.
    pub fn new(store: Arc<DealStore>) -> Arc<Self> {
        Self::with_window(store, DEBOUNCE_WINDOW)
    }

    /// Create an engine with an explicit debounce window.
    pub fn with_window(store: Arc<DealStore>, window: Duration) -> Arc<Self> {
        let (view_tx, _) = watch::channel(Arc::new(Vec::new()));
        let (busy_tx, _) = watch::channel(false);
        Arc::new(Self {
            store,
            criteria: RwLock::new(FilterCriteria::default()),
            favorites: RwLock::new(HashSet::new()),
            commitments: RwLock::new(HashSet::new()),
            view_tx,
            busy_tx,
            debouncer: Debouncer::new(window),
        })
    }

    /// Update exactly one criteria field and schedule a recomputation.
    ///
    /// This is the only mutation entry point for the criteria; the typed
    /// [`Criterion`] rules out mismatched field/value shapes.
    pub async fn set_criterion(self: &Arc<Self>, criterion: Criterion) {
        self.criteria.write().await.apply(criterion);
        self.schedule().await;
    }

    /// Reset every criteria field to its fixed default and schedule a
    /// recomputation. Idempotent.
    pub async fn clear(self: &Arc<Self>) {
        self.criteria.write().await.clear();
        self.schedule().await;
    }

    /// Replace the caller's favorites set (fetched externally).
    pub async fn set_favorites(self: &Arc<Self>, ids: HashSet<DealId>) {
        *self.favorites.write().await = ids;
        self.schedule().await;
    }

    /// Replace the caller's commitments set (fetched externally).
    pub async fn set_commitments(self: &Arc<Self>, ids: HashSet<DealId>) {
        *self.commitments.write().await = ids;
        self.schedule().await;
    }

    /// A copy of the current criteria.
    pub async fn criteria(&self) -> FilterCriteria {
        self.criteria.read().await.clone()
    }

    /// The most recently computed view. Never triggers a recomputation.
    pub fn current_view(&self) -> Arc<Vec<Deal>> {
        self.view_tx.borrow().clone()
    }

    /// Subscribe to view replacements.
    pub fn subscribe_view(&self) -> watch::Receiver<Arc<Vec<Deal>>> {
        self.view_tx.subscribe()
    }

    /// Whether a recomputation is pending or running.
    pub fn is_busy(&self) -> bool {
        *self.busy_tx.borrow()
    }

    /// Subscribe to busy-flag transitions.
    pub fn subscribe_busy(&self) -> watch::Receiver<bool> {
        self.busy_tx.subscribe()
    }

    /// Spawn the task that re-schedules a recomputation on every store
    /// snapshot replacement. Runs until `cancel` is triggered or the
    /// store is dropped.
    pub fn spawn_store_watcher(
        self: &Arc<Self>,
        cancel: CancellationToken,
    ) -> tokio::task::JoinHandle<()> {
        let engine = Arc::clone(self);
        let mut snapshots = engine.store.subscribe();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        tracing::debug!("Store watcher cancelled");
                        return;
                    }
                    changed = snapshots.changed() => {
                        if changed.is_err() {
                            tracing::debug!("Store dropped, watcher exiting");
                            return;
                        }
                        engine.schedule().await;
                    }
                }
            }
        })
    }

    /// Mark the engine busy and hand a recomputation to the debouncer.
    /// An earlier pending recomputation is cancelled, never run
    /// alongside the new one.
    async fn schedule(self: &Arc<Self>) {
        self.busy_tx.send_replace(true);
        let engine = Arc::clone(self);
        self.debouncer
            .schedule(async move {
                engine.recompute().await;
            })
            .await;
    }

    /// The actual filter pass: one linear scan over the snapshot.
    async fn recompute(&self) {
        let snapshot = self.store.snapshot();
        let criteria = self.criteria.read().await.clone();
        let favorites = self.favorites.read().await;
        let commitments = self.commitments.read().await;

        let view = filter_deals(&snapshot.deals, &criteria, &favorites, &commitments);
        tracing::debug!(
            total = snapshot.deals.len(),
            visible = view.len(),
            "Filtered view recomputed",
        );

        self.view_tx.send_replace(Arc::new(view));
        self.busy_tx.send_replace(false);
    }
}
