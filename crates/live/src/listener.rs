//! The live-update listener.
//!
//! Runs a long-lived task that keeps the push channel subscribed
//! (connect -> process -> reconnect) and translates every `deal-update`
//! event into a deal store refresh. All three mutation kinds have the
//! identical effect: one full collection re-fetch. Incremental patching
//! keyed by the event payload is deliberately not attempted.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use poolbuy_store::DealStore;

use crate::client::PushClient;
use crate::messages::{parse_message, PushMessage};
use crate::reconnect::{reconnect_loop, BackoffPolicy};

/// Bound on how long teardown waits for the listener task to exit.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the running push subscription.
pub struct DealUpdateListener {
    cancel: CancellationToken,
    task_handle: tokio::task::JoinHandle<()>,
}

impl DealUpdateListener {
    /// Spawn the subscription task.
    ///
    /// The initial deal load is not this listener's job: it is triggered
    /// independently, and deals stay usable through explicit fetches even
    /// if the channel never connects.
    pub fn start(client: PushClient, store: Arc<DealStore>) -> Self {
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        let task_handle = tokio::spawn(async move {
            tracing::info!(url = %client.ws_url(), "Starting deal-update listener");
            run_connection_loop(&client, &store, &task_cancel).await;
            tracing::info!("Deal-update listener exited");
        });

        Self {
            cancel,
            task_handle,
        }
    }

    /// Stop processing events and wait (bounded) for the task to exit.
    ///
    /// A refresh already in flight is allowed to complete; it merely
    /// updates a store nobody may be observing anymore, which is
    /// harmless.
    pub async fn shutdown(self) {
        tracing::info!("Shutting down deal-update listener");
        self.cancel.cancel();
        let _ = tokio::time::timeout(SHUTDOWN_TIMEOUT, self.task_handle).await;
    }
}

/// Core loop: connect -> process frames -> reconnect, until cancelled.
async fn run_connection_loop(
    client: &PushClient,
    store: &Arc<DealStore>,
    cancel: &CancellationToken,
) {
    let policy = BackoffPolicy::default();

    let mut conn = match client.connect().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::warn!(error = %e, "Push channel connect failed, entering reconnect loop");
            match reconnect_loop(client, &policy, cancel).await {
                Some(conn) => conn,
                None => return, // cancelled
            }
        }
    };

    loop {
        process_frames(&mut conn.ws_stream, store, cancel).await;

        if cancel.is_cancelled() {
            return;
        }

        tracing::info!("Push channel lost, entering reconnect loop");
        conn = match reconnect_loop(client, &policy, cancel).await {
            Some(conn) => conn,
            None => return, // cancelled
        };
    }
}

/// Read frames until the channel closes, a receive error occurs, or the
/// listener is cancelled.
async fn process_frames(
    ws_stream: &mut tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >,
    store: &Arc<DealStore>,
    cancel: &CancellationToken,
) {
    loop {
        let msg_result = tokio::select! {
            _ = cancel.cancelled() => return,
            msg = ws_stream.next() => match msg {
                Some(result) => result,
                None => {
                    tracing::info!("Push channel stream exhausted");
                    return;
                }
            },
        };

        match msg_result {
            Ok(Message::Text(text)) => handle_text_frame(&text, store),
            Ok(Message::Ping(_) | Message::Pong(_)) => {
                // Handled automatically by tungstenite.
            }
            Ok(Message::Close(frame)) => {
                tracing::info!(?frame, "Push channel closed by server");
                return;
            }
            Ok(_) => {
                // Binary / raw frames — nothing on this channel uses them.
            }
            Err(e) => {
                tracing::error!(error = %e, "Push channel receive error");
                return;
            }
        }
    }
}

/// Dispatch one parsed text frame.
///
/// Every `deal-update`, regardless of kind, schedules its own refresh.
/// Rapid successive events are not coalesced: overlapping fetches are an
/// accepted inefficiency, and the store ends up with whatever the
/// last-completing fetch returned.
fn handle_text_frame(text: &str, store: &Arc<DealStore>) {
    match parse_message(text) {
        Ok(PushMessage::DealUpdate(data)) => {
            tracing::debug!(kind = ?data.kind, "Deal update received, refreshing store");
            let store = Arc::clone(store);
            tokio::spawn(async move {
                // Failures publish their own notice; nothing to do here.
                let _ = store.refresh().await;
            });
        }
        Err(e) => {
            tracing::warn!(error = %e, raw_message = %text, "Ignoring unknown push message");
        }
    }
}
