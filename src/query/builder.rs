//! Predicate construction from raw filter input
//!
//! Translates the optional, loosely-formatted query parameters into immutable
//! predicate values: a structured part the catalog store can execute against
//! indexed columns, and a residual part evaluated after retrieval from
//! spec-sheet attributes. Parsing never fails; malformed fields degrade to
//! "no constraint" so a noisy filter UI cannot hard-fail a query.

use crate::query::{
    FilterParams, RecommendParams, RecommendPredicate, ResidualPredicate, SortKey,
    StructuredPredicate,
};
use crate::types::PRICE_CEILING;

pub struct PredicateBuilder;

impl PredicateBuilder {
    /// Build lineup predicates from raw faceted-browse parameters.
    pub fn build(params: &FilterParams) -> (StructuredPredicate, ResidualPredicate, SortKey) {
        let structured = StructuredPredicate {
            price_min: parse_price(params.price_min.as_deref(), 0),
            price_max: parse_price(params.price_max.as_deref(), PRICE_CEILING),
            body_types: split_list(params.body_types.as_deref()),
            fuel_types: split_list(params.fuel_types.as_deref()),
            transmissions: split_list(params.transmissions.as_deref()),
            seats: parse_seat_labels(params.seats.as_deref()),
        };

        let residual = ResidualPredicate {
            min_mileage: parse_threshold(params.mileage.as_deref()),
            min_electric_range: parse_threshold(params.electric_range.as_deref()),
            drive_types: split_list(params.drive_types.as_deref()),
            min_safety_rating: parse_threshold(params.safety_rating.as_deref()),
        };

        let sort = SortKey::parse(params.sort_by.as_deref());

        (structured, residual, sort)
    }

    /// Build the structured-only predicate for the recommendation ranker.
    /// "All" is a sentinel for "no constraint" on the categorical fields.
    pub fn build_recommend(params: &RecommendParams) -> RecommendPredicate {
        RecommendPredicate {
            price_min: parse_price(params.min.as_deref(), 0),
            price_max: parse_price(params.max.as_deref(), PRICE_CEILING),
            fuel_type: non_sentinel(params.fuel.as_deref()),
            transmission: non_sentinel(params.trans.as_deref()),
            body_type: non_sentinel(params.body_type.as_deref()),
        }
    }
}

/// Split a comma-separated OR-set, dropping empty segments. Absent or empty
/// input means "no constraint", never "match none".
fn split_list(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract the leading integer from each seating label: "5 Seater" -> 5,
/// "8+ Seater" -> 8. Labels without a leading integer are dropped silently.
fn parse_seat_labels(raw: Option<&str>) -> Vec<u32> {
    split_list(raw)
        .iter()
        .filter_map(|label| leading_integer(label))
        .collect()
}

fn leading_integer(label: &str) -> Option<u32> {
    let digits: String = label
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits.parse().ok()
}

/// Parse an inclusive lower-bound threshold, tolerating a trailing "+".
/// Malformed input yields no constraint.
fn parse_threshold(raw: Option<&str>) -> Option<f64> {
    let trimmed = raw?.trim().trim_end_matches('+').trim();
    trimmed.parse::<i64>().ok().map(|value| value as f64)
}

/// Lenient price parse with an explicit default, so the result window is
/// always a bounded [min, max].
fn parse_price(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

/// Treat absence, empty strings, and the "All" sentinel as no constraint.
fn non_sentinel(raw: Option<&str>) -> Option<String> {
    let value = raw?.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_params_mean_no_constraint() {
        let (structured, residual, sort) = PredicateBuilder::build(&FilterParams::default());

        assert_eq!(structured, StructuredPredicate::default());
        assert!(residual.is_empty());
        assert_eq!(sort, SortKey::Alphabetical);
    }

    #[test]
    fn comma_lists_drop_empty_segments() {
        let params = FilterParams {
            fuel_types: Some("Petrol,,Diesel,".to_string()),
            ..Default::default()
        };

        let (structured, _, _) = PredicateBuilder::build(&params);
        assert_eq!(structured.fuel_types, vec!["Petrol", "Diesel"]);
    }

    #[test]
    fn seat_labels_parse_leading_integers() {
        let params = FilterParams {
            seats: Some("5 Seater,8+ Seater,N/A".to_string()),
            ..Default::default()
        };

        let (structured, _, _) = PredicateBuilder::build(&params);
        assert_eq!(structured.seats, vec![5, 8]);
    }

    #[test]
    fn thresholds_accept_trailing_plus() {
        let params = FilterParams {
            mileage: Some("18+".to_string()),
            safety_rating: Some("4".to_string()),
            ..Default::default()
        };

        let (_, residual, _) = PredicateBuilder::build(&params);
        assert_eq!(residual.min_mileage, Some(18.0));
        assert_eq!(residual.min_safety_rating, Some(4.0));
    }

    #[test]
    fn malformed_thresholds_degrade_to_no_constraint() {
        let params = FilterParams {
            mileage: Some("lots".to_string()),
            price_min: Some("cheap".to_string()),
            ..Default::default()
        };

        let (structured, residual, _) = PredicateBuilder::build(&params);
        assert_eq!(residual.min_mileage, None);
        assert_eq!(structured.price_min, 0);
    }

    #[test]
    fn price_window_defaults_are_bounded() {
        let (structured, _, _) = PredicateBuilder::build(&FilterParams::default());
        assert_eq!(structured.price_min, 0);
        assert_eq!(structured.price_max, PRICE_CEILING);
    }

    #[test]
    fn sort_keys() {
        assert_eq!(SortKey::parse(Some("priceLow")), SortKey::PriceLow);
        assert_eq!(SortKey::parse(Some("priceHigh")), SortKey::PriceHigh);
        assert_eq!(SortKey::parse(Some("anything")), SortKey::Alphabetical);
        assert_eq!(SortKey::parse(None), SortKey::Alphabetical);
    }

    #[test]
    fn recommend_all_sentinel_is_no_constraint() {
        let params = RecommendParams {
            min: Some("500000".to_string()),
            max: Some("garbage".to_string()),
            fuel: Some("All".to_string()),
            trans: Some("Automatic".to_string()),
            body_type: None,
        };

        let predicate = PredicateBuilder::build_recommend(&params);
        assert_eq!(predicate.price_min, 500_000);
        assert_eq!(predicate.price_max, PRICE_CEILING);
        assert_eq!(predicate.fuel_type, None);
        assert_eq!(predicate.transmission.as_deref(), Some("Automatic"));
        assert_eq!(predicate.body_type, None);
    }
}
