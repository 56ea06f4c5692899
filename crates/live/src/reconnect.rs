//! Exponential backoff between push-channel connection attempts.
//!
//! A dropped push channel has no user-visible error state; the channel
//! layer keeps retrying in the background with increasing delays until
//! the connection is restored or the listener is torn down.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::client::{PushClient, PushConnection};

/// Tunable parameters for the backoff strategy.
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    /// Delay before the first reconnection attempt.
    pub initial_delay: Duration,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
    /// Factor by which the delay grows after each failure.
    pub multiplier: f64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

impl BackoffPolicy {
    /// The delay following `current`, clamped to `max_delay`.
    pub fn next_delay(&self, current: Duration) -> Duration {
        let next_ms = (current.as_millis() as f64 * self.multiplier) as u64;
        Duration::from_millis(next_ms).min(self.max_delay)
    }
}

/// Retry the push-channel connection until it succeeds or `cancel` is
/// triggered.
///
/// Connection failures are logged and otherwise swallowed; there is no
/// user-facing notice for a dropped channel.
pub async fn reconnect_loop(
    client: &PushClient,
    policy: &BackoffPolicy,
    cancel: &CancellationToken,
) -> Option<PushConnection> {
    let mut delay = policy.initial_delay;
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        tracing::info!(
            url = %client.ws_url(),
            attempt,
            delay_ms = delay.as_millis() as u64,
            "Reconnecting to push channel",
        );

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Reconnect cancelled");
                return None;
            }
            result = client.connect() => {
                match result {
                    Ok(conn) => return Some(conn),
                    Err(e) => {
                        tracing::warn!(error = %e, "Reconnect attempt {attempt} failed");
                    }
                }
            }
        }

        tokio::select! {
            _ = cancel.cancelled() => return None,
            _ = tokio::time::sleep(delay) => {}
        }

        delay = policy.next_delay(delay);
    }
}
