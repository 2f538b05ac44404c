//! Filter & rank engine
//!
//! The core decision logic: executes the structured predicate against the
//! catalog store, applies the residual predicate in memory via the spec-sheet
//! extractor, then sorts. The recommendation ranker shares the same store
//! handle but runs purely structured.

use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::query::{
    FilterParams, LineupResponse, PredicateBuilder, RecommendParams, ResidualPredicate, SortKey,
    ATTR_DRIVE_TYPE, ATTR_MILEAGE, ATTR_RANGE, ATTR_SAFETY_RATING,
};
use crate::specs;
use crate::types::{BrandSummary, ModelListing, SpecSheet, VariantHit};
use crate::{Error, Result};

/// Number of variants returned by the recommendation ranker.
const RECOMMEND_LIMIT: usize = 5;

pub struct CatalogEngine {
    store: Arc<dyn CatalogStore>,
}

impl CatalogEngine {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Faceted brand lineup: resolve the brand, fetch models with their
    /// representative variants under the structured predicate, drop
    /// candidates failing the residual predicate, sort, count.
    ///
    /// An unknown brand slug is the only hard error; an empty lineup is a
    /// valid result with count 0.
    pub async fn brand_lineup(
        &self,
        brand_slug: &str,
        params: &FilterParams,
    ) -> Result<LineupResponse> {
        let brand = self
            .store
            .brand_by_slug(brand_slug)
            .await?
            .ok_or_else(|| Error::BrandNotFound(brand_slug.to_string()))?;

        let (structured, residual, sort) = PredicateBuilder::build(params);

        let mut cars: Vec<ModelListing> = self
            .store
            .lineup(brand.id, &structured)
            .await?
            .into_iter()
            .filter(|listing| residual_matches(&residual, &listing.variant.specs))
            .collect();

        sort_listings(&mut cars, sort);

        tracing::debug!(
            brand = %brand.slug,
            count = cars.len(),
            ?sort,
            "lineup query complete",
        );

        let count = cars.len();
        Ok(LineupResponse {
            brand: BrandSummary::from(&brand),
            cars,
            count,
        })
    }

    /// Best-match recommendation: top 5 variants ascending by price under a
    /// loose structured predicate. Fewer than 5 results is a valid outcome.
    pub async fn recommend(&self, params: &RecommendParams) -> Result<Vec<VariantHit>> {
        let predicate = PredicateBuilder::build_recommend(params);
        self.store.find_variants(&predicate, RECOMMEND_LIMIT).await
    }
}

/// Evaluate the residual predicate against one variant's spec sheet.
/// A clause whose attribute is absent passes: absence is never evidence of
/// failure to match.
fn residual_matches(residual: &ResidualPredicate, sheet: &SpecSheet) -> bool {
    if let Some(min) = residual.min_mileage {
        if let Some(mileage) = specs::numeric(sheet, ATTR_MILEAGE) {
            if mileage < min {
                return false;
            }
        }
    }

    if let Some(min) = residual.min_electric_range {
        if let Some(range) = specs::numeric(sheet, ATTR_RANGE) {
            if range < min {
                return false;
            }
        }
    }

    if let Some(min) = residual.min_safety_rating {
        if let Some(rating) = specs::numeric(sheet, ATTR_SAFETY_RATING) {
            if rating < min {
                return false;
            }
        }
    }

    if !residual.drive_types.is_empty() {
        if let Some(stored) = specs::token(sheet, ATTR_DRIVE_TYPE) {
            let matched = residual.drive_types.iter().any(|label| {
                // Match on the label's first word: "4WD (All Wheel)" -> "4wd".
                label
                    .split_whitespace()
                    .next()
                    .map(|word| stored.contains(&word.to_lowercase()))
                    .unwrap_or(false)
            });
            if !matched {
                return false;
            }
        }
    }

    true
}

/// Stable, total ordering: the requested key first, model id as the final
/// tie-break so identical queries always return identical sequences.
fn sort_listings(listings: &mut [ModelListing], sort: SortKey) {
    match sort {
        SortKey::PriceLow => {
            listings.sort_by_key(|l| (l.variant.price, l.model.id));
        }
        SortKey::PriceHigh => {
            listings.sort_by_key(|l| (std::cmp::Reverse(l.variant.price), l.model.id));
        }
        SortKey::Alphabetical => {
            listings
                .sort_by(|a, b| a.model.name.cmp(&b.model.name).then(a.model.id.cmp(&b.model.id)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SpecValue;
    use std::collections::HashMap;

    fn sheet(entries: &[(&str, &str)]) -> SpecSheet {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), SpecValue::Text(v.to_string())))
            .collect()
    }

    #[test]
    fn absent_attribute_passes_any_threshold() {
        let residual = ResidualPredicate {
            min_mileage: Some(25.0),
            ..Default::default()
        };

        assert!(residual_matches(&residual, &HashMap::new()));
    }

    #[test]
    fn present_attribute_is_enforced() {
        let residual = ResidualPredicate {
            min_mileage: Some(20.0),
            ..Default::default()
        };

        assert!(!residual_matches(&residual, &sheet(&[("mileage", "18.5 kmpl")])));
        assert!(residual_matches(&residual, &sheet(&[("mileage", "21.0 kmpl")])));
    }

    #[test]
    fn threshold_is_inclusive() {
        let residual = ResidualPredicate {
            min_safety_rating: Some(5.0),
            ..Default::default()
        };

        assert!(residual_matches(&residual, &sheet(&[("safety_rating", "5 Star")])));
    }

    #[test]
    fn drive_type_matches_on_first_word_substring() {
        let residual = ResidualPredicate {
            drive_types: vec!["4WD (Four Wheel Drive)".to_string()],
            ..Default::default()
        };

        assert!(residual_matches(&residual, &sheet(&[("drive_type", "4WD")])));
        assert!(!residual_matches(&residual, &sheet(&[("drive_type", "FWD")])));
        // Absent drive type passes.
        assert!(residual_matches(&residual, &HashMap::new()));
    }

    #[test]
    fn electric_range_clause() {
        let residual = ResidualPredicate {
            min_electric_range: Some(400.0),
            ..Default::default()
        };

        assert!(residual_matches(&residual, &sheet(&[("range", "465 km")])));
        assert!(!residual_matches(&residual, &sheet(&[("range", "315 km")])));
        // A petrol car with no range attribute is not excluded.
        assert!(residual_matches(&residual, &sheet(&[("mileage", "17 kmpl")])));
    }
}
