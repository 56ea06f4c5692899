//! Push-channel message types and parser.
//!
//! The backend sends JSON frames with the shape
//! `{"event": "<name>", "data": {...}}`. The only event this client
//! consumes is `deal-update`; its payload carries a `type` tag and
//! nothing else this client reads.

use serde::Deserialize;

/// Known push-channel events, deserialized via the `"event"` tag with
/// associated `"data"` content.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum PushMessage {
    /// A deal was created, updated, or deleted server-side.
    #[serde(rename = "deal-update")]
    DealUpdate(DealUpdateData),
}

/// Payload for `deal-update` events.
///
/// Extra payload fields (the mutated deal's id, for instance) are
/// deliberately not modeled: every kind of update triggers the same full
/// collection refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct DealUpdateData {
    #[serde(rename = "type")]
    pub kind: DealUpdateKind,
}

/// The mutation kind carried by a `deal-update` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealUpdateKind {
    Created,
    Updated,
    Deleted,
}

/// Parse a push-channel text frame into a typed message.
///
/// Returns `Err` for malformed JSON or unknown `event` values. Callers
/// should log unknown events and continue.
pub fn parse_message(text: &str) -> Result<PushMessage, serde_json::Error> {
    serde_json::from_str(text)
}
