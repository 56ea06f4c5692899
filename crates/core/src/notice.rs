//! User-visible notices and the in-process notice bus.
//!
//! Recoverable failures (authorization violations, failed fetches) surface
//! to the presentation layer as dismissible notices naming the failed
//! operation in general terms. Nothing here is process-fatal: the page
//! session stays interactive after any single failed request.

use tokio::sync::broadcast;

use crate::types::Timestamp;

/// Default buffer capacity for the notice channel.
const DEFAULT_CAPACITY: usize = 64;

/// Classification of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The caller lacks the role required for the operation.
    Authorization,
    /// A network or server error during a fetch. The previous data is
    /// preserved; the operation is not retried automatically.
    FetchFailure,
}

/// A dismissible notice shown to the user.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    /// Short name of the operation that failed, e.g. `"fetching deals"`.
    pub operation: String,
    /// Human-readable detail. No structured error codes are exposed.
    pub message: String,
    pub raised_at: Timestamp,
}

impl Notice {
    pub fn authorization(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Authorization, operation, message)
    }

    pub fn fetch_failure(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::FetchFailure, operation, message)
    }

    fn new(kind: NoticeKind, operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            operation: operation.into(),
            message: message.into(),
            raised_at: chrono::Utc::now(),
        }
    }
}

/// In-process fan-out channel for [`Notice`]s.
///
/// Wraps a [`broadcast::Sender`] so any number of presentation-side
/// subscribers can independently observe every notice.
pub struct NoticeBus {
    sender: broadcast::Sender<Notice>,
}

impl NoticeBus {
    /// Create a bus with a specific channel capacity. When the buffer is
    /// full the oldest un-consumed notices are dropped and slow receivers
    /// observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a notice to all current subscribers.
    ///
    /// With zero subscribers the notice is silently dropped; a send error
    /// only ever means there is no one listening.
    pub fn publish(&self, notice: Notice) {
        let _ = self.sender.send(notice);
    }

    /// Subscribe to all notices published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }
}

impl Default for NoticeBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = NoticeBus::default();
        let mut rx = bus.subscribe();

        bus.publish(Notice::fetch_failure("fetching deals", "connection refused"));

        let received = rx.recv().await.expect("should receive the notice");
        assert_eq!(received.kind, NoticeKind::FetchFailure);
        assert_eq!(received.operation, "fetching deals");
        assert_eq!(received.message, "connection refused");
    }

    #[tokio::test]
    async fn every_subscriber_sees_every_notice() {
        let bus = NoticeBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(Notice::authorization("fetching deals", "member role required"));

        assert_eq!(rx1.recv().await.unwrap().kind, NoticeKind::Authorization);
        assert_eq!(rx2.recv().await.unwrap().kind, NoticeKind::Authorization);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = NoticeBus::default();
        bus.publish(Notice::fetch_failure("fetching favorites", "timeout"));
    }
}
