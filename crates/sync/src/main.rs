//! Deal synchronization service.
//!
//! Wires the pipeline together: deal store <- backend API, filter engine
//! over the store, live-update listener keeping the store fresh, and a
//! logger for every user-visible notice. Runs until ctrl-c.

use std::collections::HashSet;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use poolbuy_client::api::MarketApi;
use poolbuy_client::config::ApiConfig;
use poolbuy_client::source::DealSource;
use poolbuy_engine::FilterEngine;
use poolbuy_live::{DealUpdateListener, PushClient};
use poolbuy_store::DealStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "poolbuy=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();
    let session = config.session();
    tracing::info!(api_url = %config.api_url, role = ?session.role, "Starting deal sync");

    let api = Arc::new(MarketApi::new(
        config.api_url.clone(),
        config.session_id.clone(),
    ));
    let store = Arc::new(DealStore::new(
        Arc::clone(&api) as Arc<dyn DealSource>,
        session,
    ));
    let engine = FilterEngine::new(Arc::clone(&store));

    // Surface every user-visible notice in the logs.
    let mut notices = store.subscribe_notices();
    tokio::spawn(async move {
        while let Ok(notice) = notices.recv().await {
            tracing::warn!(
                kind = ?notice.kind,
                operation = %notice.operation,
                "{}",
                notice.message,
            );
        }
    });

    let watcher_cancel = CancellationToken::new();
    let watcher = engine.spawn_store_watcher(watcher_cancel.clone());

    // Initial load. Failures are already surfaced as notices; the push
    // channel or a later explicit load can still populate the store.
    if let Err(e) = store.load_all().await {
        tracing::error!(error = %e, "Initial deal load failed");
    }

    match api.list_favorites().await {
        Ok(ids) => engine.set_favorites(ids.into_iter().collect::<HashSet<_>>()).await,
        Err(e) => tracing::warn!(error = %e, "Error fetching favorites"),
    }
    match api.list_commitments().await {
        Ok(ids) => {
            engine
                .set_commitments(ids.into_iter().collect::<HashSet<_>>())
                .await;
        }
        Err(e) => tracing::warn!(error = %e, "Error fetching commitments"),
    }

    let listener = DealUpdateListener::start(
        PushClient::new(config.ws_url.clone()),
        Arc::clone(&store),
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    listener.shutdown().await;
    watcher_cancel.cancel();
    let _ = watcher.await;

    Ok(())
}
