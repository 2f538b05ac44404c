//! Tests for the recommendation ranker

use std::sync::Arc;

use showroom::catalog::{CatalogStore, MemoryStore, NewBrand, NewModel, NewVariant};
use showroom::query::{CatalogEngine, RecommendParams};

fn variant(model_id: u64, name: &str, price: u64, fuel: &str, trans: &str) -> NewVariant {
    NewVariant {
        name: name.to_string(),
        price,
        fuel_type: fuel.to_string(),
        transmission: trans.to_string(),
        model_id,
        specs: Default::default(),
        colors: Vec::new(),
    }
}

/// tata: nexon (SUV, petrol 800k manual + diesel 1200k AMT) and
/// tiago (Hatchback, petrol 600k manual + four CNG trims for cap tests).
async fn seeded_engine() -> CatalogEngine {
    let store = Arc::new(MemoryStore::new());

    let brand = store
        .create_brand(NewBrand {
            name: "Tata".to_string(),
            slug: "tata".to_string(),
            logo_url: None,
            logo_url_dark: None,
        })
        .await
        .unwrap();

    let nexon = store
        .create_model(NewModel {
            name: "Nexon".to_string(),
            slug: "nexon".to_string(),
            body_type: "SUV".to_string(),
            brand_id: brand.id,
            seats: Some(5),
            main_image_url: None,
            images: Vec::new(),
        })
        .await
        .unwrap();
    store
        .create_variant(variant(nexon.id, "Smart", 800_000, "Petrol", "Manual"))
        .await
        .unwrap();
    store
        .create_variant(variant(
            nexon.id,
            "Creative",
            1_200_000,
            "Diesel",
            "Automatic (AMT)",
        ))
        .await
        .unwrap();

    let tiago = store
        .create_model(NewModel {
            name: "Tiago".to_string(),
            slug: "tiago".to_string(),
            body_type: "Hatchback".to_string(),
            brand_id: brand.id,
            seats: Some(5),
            main_image_url: None,
            images: Vec::new(),
        })
        .await
        .unwrap();
    store
        .create_variant(variant(tiago.id, "XE", 600_000, "Petrol", "Manual"))
        .await
        .unwrap();
    for (name, price) in [
        ("XM CNG", 650_000),
        ("XT CNG", 700_000),
        ("XZ CNG", 750_000),
        ("XZ+ CNG", 790_000),
    ] {
        store
            .create_variant(variant(tiago.id, name, price, "CNG", "Manual"))
            .await
            .unwrap();
    }

    CatalogEngine::new(store)
}

fn params(min: &str, max: &str, fuel: Option<&str>) -> RecommendParams {
    RecommendParams {
        min: Some(min.to_string()),
        max: Some(max.to_string()),
        fuel: fuel.map(|s| s.to_string()),
        trans: None,
        body_type: None,
    }
}

#[tokio::test]
async fn petrol_within_budget_ordered_ascending() {
    let engine = seeded_engine().await;

    let hits = engine
        .recommend(&params("500000", "900000", Some("Petrol")))
        .await
        .unwrap();

    // Both petrol variants qualify; tiago's is cheaper and comes first.
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].model.slug, "tiago");
    assert_eq!(hits[0].variant.price, 600_000);
    assert_eq!(hits[1].model.slug, "nexon");
    assert_eq!(hits[1].variant.price, 800_000);
    assert_eq!(hits[0].brand.slug, "tata");
}

#[tokio::test]
async fn never_more_than_five_results() {
    let engine = seeded_engine().await;

    let hits = engine
        .recommend(&RecommendParams::default())
        .await
        .unwrap();

    assert_eq!(hits.len(), 5);
    let prices: Vec<u64> = hits.iter().map(|h| h.variant.price).collect();
    assert!(prices.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn all_sentinel_means_no_fuel_constraint() {
    let engine = seeded_engine().await;

    let all = engine
        .recommend(&params("0", "20000000", Some("All")))
        .await
        .unwrap();
    let unconstrained = engine
        .recommend(&params("0", "20000000", None))
        .await
        .unwrap();

    assert_eq!(all.len(), unconstrained.len());
}

#[tokio::test]
async fn transmission_matches_by_substring() {
    let engine = seeded_engine().await;

    let hits = engine
        .recommend(&RecommendParams {
            trans: Some("Automatic".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    // "Automatic" finds the "Automatic (AMT)" trim.
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].variant.name, "Creative");
}

#[tokio::test]
async fn body_type_constrains_the_owning_model() {
    let engine = seeded_engine().await;

    let hits = engine
        .recommend(&RecommendParams {
            body_type: Some("suv".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|h| h.model.body_type == "SUV"));
}

#[tokio::test]
async fn zero_matches_is_a_valid_outcome() {
    let engine = seeded_engine().await;

    let hits = engine
        .recommend(&params("0", "100000", None))
        .await
        .unwrap();

    assert!(hits.is_empty());
}

#[tokio::test]
async fn malformed_bounds_fall_back_to_defaults() {
    let engine = seeded_engine().await;

    let hits = engine
        .recommend(&params("garbage", "more garbage", None))
        .await
        .unwrap();

    // Defaults [0, ceiling] admit everything, capped at 5.
    assert_eq!(hits.len(), 5);
}
