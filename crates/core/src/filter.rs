//! The deal filter pass.
//!
//! A single linear scan over a deal snapshot applying the active
//! [`FilterCriteria`] predicates as a short-circuiting conjunction.
//! Filtering is stable: the output preserves the relative order of the
//! input. Inactive predicates (empty search string, unset category or
//! distributor, full-span ranges, false membership flags) are skipped,
//! never treated as universally failing.

use std::collections::HashSet;

use crate::criteria::{DEFAULT_PRICE_RANGE, DEFAULT_QUANTITY_RANGE, FilterCriteria};
use crate::deal::Deal;
use crate::types::DealId;

/// Compute the filtered view of `deals` under `criteria`.
///
/// `favorites` and `commitments` are the caller's membership sets; they
/// are only consulted when the corresponding flag is active. The result
/// replaces any previous view wholesale — there is no incremental
/// diffing.
pub fn filter_deals(
    deals: &[Deal],
    criteria: &FilterCriteria,
    favorites: &HashSet<DealId>,
    commitments: &HashSet<DealId>,
) -> Vec<Deal> {
    deals
        .iter()
        .filter(|deal| deal_matches(deal, criteria, favorites, commitments))
        .cloned()
        .collect()
}

/// Test one deal against every active predicate, in a fixed order, with
/// short-circuit evaluation.
pub fn deal_matches(
    deal: &Deal,
    criteria: &FilterCriteria,
    favorites: &HashSet<DealId>,
    commitments: &HashSet<DealId>,
) -> bool {
    let query = criteria.search_query.trim();
    if !query.is_empty() && !text_matches(deal, query) {
        return false;
    }

    if let Some(ref category) = criteria.category {
        if deal.category != *category {
            return false;
        }
    }

    if let Some(ref distributor) = criteria.distributor {
        if deal.distributor.display_name != *distributor {
            return false;
        }
    }

    // A range left at its full default span is an unconstrained slider,
    // not a predicate. Applying it would break the identity filter for
    // deals priced outside the span.
    if criteria.price_range != DEFAULT_PRICE_RANGE {
        let (lo, hi) = criteria.price_range;
        if deal.discount_price < lo || deal.discount_price > hi {
            return false;
        }
    }

    if criteria.quantity_range != DEFAULT_QUANTITY_RANGE {
        let (lo, hi) = criteria.quantity_range;
        if deal.min_qty_for_discount < lo || deal.min_qty_for_discount > hi {
            return false;
        }
    }

    if criteria.favorites_only && !favorites.contains(&deal.id) {
        return false;
    }

    if criteria.committed_only && !commitments.contains(&deal.id) {
        return false;
    }

    true
}

/// Case-insensitive substring match against deal name OR description.
///
/// Search does not look at the category label; filtering by category is a
/// separate predicate.
fn text_matches(deal: &Deal, query: &str) -> bool {
    let needle = query.to_lowercase();
    deal.name.to_lowercase().contains(&needle)
        || deal.description.to_lowercase().contains(&needle)
}
