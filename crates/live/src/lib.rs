//! Push-channel subscription for server-originated deal mutations.
//!
//! [`DealUpdateListener`](listener::DealUpdateListener) keeps a standing
//! WebSocket subscription to the backend and translates every
//! `deal-update` event into a deal store refresh. The channel is purely
//! an invalidation signal: no payload beyond the mutation kind is read,
//! and deals stay fully usable through explicit fetches even if the
//! channel never connects.

pub mod client;
pub mod listener;
pub mod messages;
pub mod reconnect;

pub use client::{PushClient, PushClientError};
pub use listener::DealUpdateListener;
