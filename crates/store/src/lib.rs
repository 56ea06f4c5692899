//! The authoritative deal snapshot.
//!
//! [`DealStore`](store::DealStore) holds the single canonical deal
//! collection for the current caller and replaces it wholesale on every
//! fetch. Consumers subscribe to snapshot changes; they never mutate it.

pub mod store;

pub use store::{DealStore, Snapshot, StoreError};
