//! The deal wire model and facet derivation.
//!
//! [`Deal`] mirrors the JSON shape the backend returns from the deal
//! collection fetch. Aggregate fields (`total_commitments`,
//! `total_commitment_quantity`, `views`) are supplied by the backend and
//! never computed client-side. Deals are replaced wholesale on every
//! fetch; nothing in this crate patches individual fields in place.

use serde::{Deserialize, Serialize};

use crate::types::{DealId, Timestamp};

/// The distributor offering a deal.
///
/// The backend sends a richer object; only the display name is read here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distributor {
    /// Name shown in deal listings and used for distributor filtering.
    pub display_name: String,
}

/// One purchasable bulk offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    /// Opaque backend-assigned identifier.
    pub id: DealId,
    pub name: String,
    pub description: String,
    /// Category label. Values are opaque to the client; the filter treats
    /// them as plain strings.
    pub category: String,
    pub distributor: Distributor,
    /// Ordered image URLs. May be empty or absent in the payload.
    #[serde(default)]
    pub images: Vec<String>,
    /// Undiscounted unit cost. Non-negative; backend-asserted.
    pub original_cost: f64,
    /// Discounted unit price. `discount_price <= original_cost` is a
    /// backend invariant, not enforced here.
    pub discount_price: f64,
    /// Minimum committed quantity required to unlock the discount.
    pub min_qty_for_discount: u32,
    pub deal_start_at: Timestamp,
    pub deal_ends_at: Timestamp,
    /// Number of members with an active commitment (backend aggregate).
    #[serde(default)]
    pub total_commitments: u64,
    /// Sum of committed quantities across members (backend aggregate).
    #[serde(default)]
    pub total_commitment_quantity: u64,
    /// View counter (backend aggregate).
    #[serde(default)]
    pub views: u64,
}

/// Distinct category labels present in a deal collection, in order of
/// first occurrence. Feeds the category selection UI.
pub fn distinct_categories(deals: &[Deal]) -> Vec<String> {
    distinct(deals.iter().map(|d| d.category.as_str()))
}

/// Distinct distributor display names present in a deal collection, in
/// order of first occurrence. Feeds the distributor selection UI.
pub fn distinct_distributors(deals: &[Deal]) -> Vec<String> {
    distinct(deals.iter().map(|d| d.distributor.display_name.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for value in values {
        if seen.insert(value) {
            out.push(value.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    /// Build a minimal deal for facet tests.
    fn deal(id: &str, category: &str, distributor: &str) -> Deal {
        Deal {
            id: id.to_string(),
            name: format!("deal {id}"),
            description: String::new(),
            category: category.to_string(),
            distributor: Distributor {
                display_name: distributor.to_string(),
            },
            images: vec![],
            original_cost: 100.0,
            discount_price: 80.0,
            min_qty_for_discount: 10,
            deal_start_at: Utc::now(),
            deal_ends_at: Utc::now(),
            total_commitments: 0,
            total_commitment_quantity: 0,
            views: 0,
        }
    }

    #[test]
    fn deserializes_camel_case_payload() {
        let json = r#"{
            "id": "d-1",
            "name": "Pinot Noir case",
            "description": "12 bottles",
            "category": "WINE",
            "distributor": {"displayName": "Vine & Co", "id": "u-9"},
            "images": ["https://cdn.example/a.png"],
            "originalCost": 240.0,
            "discountPrice": 180.0,
            "minQtyForDiscount": 5,
            "dealStartAt": "2026-01-01T00:00:00Z",
            "dealEndsAt": "2026-02-01T00:00:00Z",
            "totalCommitments": 3,
            "totalCommitmentQuantity": 17,
            "views": 120
        }"#;

        let deal: Deal = serde_json::from_str(json).unwrap();
        assert_eq!(deal.id, "d-1");
        assert_eq!(deal.distributor.display_name, "Vine & Co");
        assert_eq!(deal.discount_price, 180.0);
        assert_eq!(deal.min_qty_for_discount, 5);
        assert_eq!(deal.total_commitment_quantity, 17);
    }

    #[test]
    fn missing_images_and_aggregates_default() {
        let json = r#"{
            "id": "d-2",
            "name": "Hop pellets",
            "description": "",
            "category": "BEER",
            "distributor": {"displayName": "Brewers United"},
            "originalCost": 50.0,
            "discountPrice": 40.0,
            "minQtyForDiscount": 20,
            "dealStartAt": "2026-01-01T00:00:00Z",
            "dealEndsAt": "2026-02-01T00:00:00Z"
        }"#;

        let deal: Deal = serde_json::from_str(json).unwrap();
        assert!(deal.images.is_empty());
        assert_eq!(deal.total_commitments, 0);
        assert_eq!(deal.views, 0);
    }

    #[test]
    fn distinct_categories_preserve_first_occurrence_order() {
        let deals = vec![
            deal("1", "WINE", "A"),
            deal("2", "BEER", "B"),
            deal("3", "WINE", "C"),
            deal("4", "CHEESE", "A"),
        ];
        assert_eq!(distinct_categories(&deals), vec!["WINE", "BEER", "CHEESE"]);
    }

    #[test]
    fn distinct_distributors_dedupe() {
        let deals = vec![
            deal("1", "WINE", "Vine & Co"),
            deal("2", "BEER", "Brewers United"),
            deal("3", "WINE", "Vine & Co"),
        ];
        assert_eq!(
            distinct_distributors(&deals),
            vec!["Vine & Co", "Brewers United"]
        );
    }

    #[test]
    fn facets_of_empty_collection_are_empty() {
        assert!(distinct_categories(&[]).is_empty());
        assert!(distinct_distributors(&[]).is_empty());
    }
}
