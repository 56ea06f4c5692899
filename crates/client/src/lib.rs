//! HTTP access to the marketplace backend.
//!
//! [`MarketApi`](api::MarketApi) wraps the REST endpoints the deal
//! browser consumes (deal collection, favorites, commitments).
//! [`DealSource`](source::DealSource) is the seam the deal store depends
//! on so tests can substitute a fake backend.

pub mod api;
pub mod config;
pub mod source;
