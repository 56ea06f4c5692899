//! Debounced derivation of the filtered deal view.
//!
//! [`FilterEngine`](engine::FilterEngine) owns the user's filter criteria
//! and recomputes the visible deal list whenever the criteria or the
//! store snapshot change, coalescing bursts of triggers through a
//! [`Debouncer`](debounce::Debouncer) so typing and slider drags cost one
//! recomputation per burst instead of one per event.

pub mod debounce;
pub mod engine;

pub use debounce::Debouncer;
pub use engine::FilterEngine;
