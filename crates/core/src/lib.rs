//! Domain model and pure logic for the poolbuy deal browser.
//!
//! This crate has no I/O: it defines the [`Deal`](deal::Deal) wire model,
//! the user's [`FilterCriteria`](criteria::FilterCriteria), the filter pass
//! that derives the visible deal list, the session/role gate, and the
//! user-visible notice types shared by the other crates.

pub mod criteria;
pub mod deal;
pub mod error;
pub mod filter;
pub mod notice;
pub mod session;
pub mod types;
