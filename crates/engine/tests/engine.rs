//! Component tests for `FilterEngine`.
//!
//! Run on tokio's paused clock so debounce windows elapse without real
//! waiting. The store is backed by a scripted fake deal source.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use poolbuy_client::api::ApiError;
use poolbuy_client::source::DealSource;
use poolbuy_core::criteria::Criterion;
use poolbuy_core::deal::{Deal, Distributor};
use poolbuy_core::session::{Role, SessionContext};
use poolbuy_core::types::DealId;
use poolbuy_engine::FilterEngine;
use poolbuy_store::DealStore;
use tokio_util::sync::CancellationToken;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

struct ScriptedSource {
    responses: tokio::sync::Mutex<VecDeque<Result<Vec<Deal>, ApiError>>>,
}

impl ScriptedSource {
    fn new(responses: Vec<Result<Vec<Deal>, ApiError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: tokio::sync::Mutex::new(responses.into()),
        })
    }
}

#[async_trait]
impl DealSource for ScriptedSource {
    async fn fetch_deals(&self) -> Result<Vec<Deal>, ApiError> {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| panic!("scripted source exhausted"))
    }
}

fn deal(id: &str, name: &str, price: f64) -> Deal {
    Deal {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        category: "WINE".to_string(),
        distributor: Distributor {
            display_name: "Vine & Co".into(),
        },
        images: vec![],
        original_cost: price * 1.5,
        discount_price: price,
        min_qty_for_discount: 10,
        deal_start_at: Utc::now(),
        deal_ends_at: Utc::now(),
        total_commitments: 0,
        total_commitment_quantity: 0,
        views: 0,
    }
}

/// Store preloaded with one response, plus an engine watching it.
async fn engine_over(
    responses: Vec<Result<Vec<Deal>, ApiError>>,
) -> (Arc<DealStore>, Arc<FilterEngine>, CancellationToken) {
    let source = ScriptedSource::new(responses);
    let store = Arc::new(DealStore::new(
        source,
        SessionContext::new("s-1", Role::Member),
    ));
    let engine = FilterEngine::new(Arc::clone(&store));
    let cancel = CancellationToken::new();
    let _watcher = engine.spawn_store_watcher(cancel.clone());
    (store, engine, cancel)
}

/// Let the debounce window (500 ms) elapse on the paused clock.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(600)).await;
}

fn ids(view: &[Deal]) -> Vec<&str> {
    view.iter().map(|d| d.id.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Test: a snapshot load flows into the view (identity filter)
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn snapshot_load_produces_identity_view() {
    let deals = vec![deal("a", "House red", 50.0), deal("b", "IPA keg", 150.0)];
    let (store, engine, _cancel) = engine_over(vec![Ok(deals.clone())]).await;

    store.load_all().await.expect("load should succeed");
    settle().await;

    assert_eq!(*engine.current_view(), deals);
}

// ---------------------------------------------------------------------------
// Test: rapid criteria edits coalesce into the final state
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn rapid_edits_apply_only_the_final_query() {
    let deals = vec![
        deal("a", "Walnut mix", 20.0),
        deal("b", "Windmill cider", 30.0),
        deal("c", "Winter ale", 40.0),
    ];
    let (store, engine, _cancel) = engine_over(vec![Ok(deals)]).await;
    store.load_all().await.expect("load should succeed");
    settle().await;

    for query in ["w", "wi", "win"] {
        engine
            .set_criterion(Criterion::SearchQuery(query.into()))
            .await;
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    settle().await;

    // Only "win" executed: "Walnut mix" matched the earlier, cancelled
    // queries but not the final one.
    assert_eq!(ids(&engine.current_view()), vec!["b", "c"]);
}

// ---------------------------------------------------------------------------
// Test: busy flag covers scheduled-through-completed
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn busy_flag_set_while_pending_and_cleared_after() {
    let (store, engine, _cancel) = engine_over(vec![Ok(vec![deal("a", "House red", 50.0)])]).await;
    store.load_all().await.expect("load should succeed");
    settle().await;
    assert!(!engine.is_busy());

    engine
        .set_criterion(Criterion::SearchQuery("red".into()))
        .await;
    assert!(engine.is_busy(), "busy from the moment work is scheduled");

    settle().await;
    assert!(!engine.is_busy(), "cleared once the recompute ran");
}

// ---------------------------------------------------------------------------
// Test: current_view never recomputes on its own
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn current_view_returns_cached_result_before_the_window() {
    let deals = vec![deal("a", "House red", 50.0), deal("b", "IPA keg", 150.0)];
    let (store, engine, _cancel) = engine_over(vec![Ok(deals.clone())]).await;
    store.load_all().await.expect("load should succeed");
    settle().await;

    engine
        .set_criterion(Criterion::SearchQuery("keg".into()))
        .await;

    // The window has not elapsed: the cached view is still the old one.
    assert_eq!(*engine.current_view(), deals);

    settle().await;
    assert_eq!(ids(&engine.current_view()), vec!["b"]);
}

// ---------------------------------------------------------------------------
// Test: clear restores the identity view
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn clear_restores_identity_view() {
    let deals = vec![deal("a", "House red", 50.0), deal("b", "IPA keg", 150.0)];
    let (store, engine, _cancel) = engine_over(vec![Ok(deals.clone())]).await;
    store.load_all().await.expect("load should succeed");
    settle().await;

    engine.set_criterion(Criterion::PriceRange(0.0, 100.0)).await;
    settle().await;
    assert_eq!(ids(&engine.current_view()), vec!["a"]);

    engine.clear().await;
    settle().await;
    assert_eq!(*engine.current_view(), deals);
}

// ---------------------------------------------------------------------------
// Test: favorites restriction uses the injected membership set
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn favorites_only_restricts_to_the_membership_set() {
    let deals = vec![deal("a", "House red", 50.0), deal("b", "IPA keg", 150.0)];
    let (store, engine, _cancel) = engine_over(vec![Ok(deals)]).await;
    store.load_all().await.expect("load should succeed");

    let favorites: HashSet<DealId> = HashSet::from(["b".to_string()]);
    engine.set_favorites(favorites).await;
    engine.set_criterion(Criterion::FavoritesOnly(true)).await;
    settle().await;

    assert_eq!(ids(&engine.current_view()), vec!["b"]);
}

// ---------------------------------------------------------------------------
// Test: a deal deleted server-side leaves the view after a refresh
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn refresh_removes_deleted_deals_from_the_view() {
    let (store, engine, _cancel) = engine_over(vec![
        Ok(vec![deal("a", "House red", 50.0), deal("c", "Cider", 25.0)]),
        // The refresh after a "deleted" push event omits deal c.
        Ok(vec![deal("a", "House red", 50.0)]),
    ])
    .await;

    store.load_all().await.expect("load should succeed");
    settle().await;
    assert_eq!(ids(&engine.current_view()), vec!["a", "c"]);

    store.refresh().await.expect("refresh should succeed");
    settle().await;
    assert_eq!(ids(&engine.current_view()), vec!["a"]);
}
