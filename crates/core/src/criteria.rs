//! User-adjustable filter criteria.
//!
//! [`FilterCriteria`] is always fully defined: resetting restores each
//! field to a fixed default rather than deleting it. The only mutation
//! entry point is [`FilterCriteria::apply`], which takes a typed
//! [`Criterion`] and updates exactly one field.

// ---------------------------------------------------------------------------
// Default ranges
// ---------------------------------------------------------------------------

/// Price range restored by [`FilterCriteria::clear`]. A range equal to
/// this full span places no constraint on results.
pub const DEFAULT_PRICE_RANGE: (f64, f64) = (0.0, 1000.0);

/// Quantity range restored by [`FilterCriteria::clear`]. A range equal to
/// this full span places no constraint on results.
pub const DEFAULT_QUANTITY_RANGE: (u32, u32) = (0, 500);

/// Initial quantity span shown by the presentation layer's slider.
///
/// Intentionally narrower than [`DEFAULT_QUANTITY_RANGE`]: "clear filters"
/// restores the wide span, while a freshly opened view displays this one.
/// The mismatch is observed product behavior and is kept as-is.
pub const UI_QUANTITY_RANGE: (u32, u32) = (1, 100);

// ---------------------------------------------------------------------------
// FilterCriteria
// ---------------------------------------------------------------------------

/// The complete set of predicates narrowing the displayed deal list.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Free-text query matched case-insensitively as a substring against
    /// deal name and description. Empty means no text constraint.
    pub search_query: String,
    /// Single category constraint; `None` means unconstrained.
    pub category: Option<String>,
    /// Single distributor display-name constraint; `None` means
    /// unconstrained.
    pub distributor: Option<String>,
    /// Closed interval applied to `discount_price`, inclusive bounds.
    pub price_range: (f64, f64),
    /// Closed interval applied to `min_qty_for_discount`, inclusive bounds.
    pub quantity_range: (u32, u32),
    /// Restrict results to the caller's favorited deal ids.
    pub favorites_only: bool,
    /// Restrict results to deals the caller has an active commitment on.
    pub committed_only: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            category: None,
            distributor: None,
            price_range: DEFAULT_PRICE_RANGE,
            quantity_range: DEFAULT_QUANTITY_RANGE,
            favorites_only: false,
            committed_only: false,
        }
    }
}

impl FilterCriteria {
    /// Update exactly one field, leaving all others untouched.
    pub fn apply(&mut self, criterion: Criterion) {
        match criterion {
            Criterion::SearchQuery(q) => self.search_query = q,
            Criterion::Category(c) => self.category = c,
            Criterion::Distributor(d) => self.distributor = d,
            Criterion::PriceRange(lo, hi) => self.price_range = (lo, hi),
            Criterion::QuantityRange(lo, hi) => self.quantity_range = (lo, hi),
            Criterion::FavoritesOnly(flag) => self.favorites_only = flag,
            Criterion::CommittedOnly(flag) => self.committed_only = flag,
        }
    }

    /// Reset every field to its fixed default. Idempotent.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// ---------------------------------------------------------------------------
// Criterion
// ---------------------------------------------------------------------------

/// A single-field criteria update.
///
/// Each variant carries the value shape its field requires, so a
/// mismatched field/value combination cannot be constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    SearchQuery(String),
    Category(Option<String>),
    Distributor(Option<String>),
    PriceRange(f64, f64),
    QuantityRange(u32, u32),
    FavoritesOnly(bool),
    CommittedOnly(bool),
}
