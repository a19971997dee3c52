//! Catalog files feeding real searches.

use std::fs;
use u_stow_catalog::{save_catalog, CatalogLoader, CatalogStore, SyntheticGenerator, SyntheticSpec};
use u_stow_grid::{SearchService, VehicleEntry, VehicleRequest};

fn one_vehicle(length: u32) -> VehicleRequest {
    VehicleRequest::new(vec![VehicleEntry::new(length, 1)]).unwrap()
}

#[test]
fn test_incomplete_listing_is_ignored_by_search() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("listings_by_location.json");
    fs::write(
        &path,
        r#"{
            "loc1": [
                {"width": 40, "length": 50, "price_in_cents": 1},
                {"id": "l1", "width": 20, "length": 30, "price_in_cents": 5000}
            ],
            "loc2": [
                {"id": "l3", "width": 10, "length": 20, "price_in_cents": 3000}
            ]
        }"#,
    )
    .unwrap();

    let store = CatalogStore::open(CatalogLoader::new(&path));
    let service = SearchService::new(&store);
    let results = service.search(&one_vehicle(20));

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].location_id, "loc2");
    assert_eq!(results[1].location_id, "loc1");
    assert_eq!(results[1].listing_ids, vec!["l1".to_string()]);
    assert_eq!(results[1].total_price_in_cents, 5000);
}

#[test]
fn test_missing_catalog_gives_no_results() {
    let dir = tempfile::tempdir().unwrap();
    let store = CatalogStore::open(CatalogLoader::new(dir.path().join("nowhere.json")));
    let service = SearchService::new(&store);
    assert!(service.search(&one_vehicle(10)).is_empty());
}

#[test]
fn test_reload_is_seen_by_next_search() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(&path, "{}").unwrap();

    let store = CatalogStore::open(CatalogLoader::new(&path));
    let service = SearchService::new(&store);
    assert!(service.search(&one_vehicle(20)).is_empty());

    let spec = SyntheticSpec {
        locations: 30,
        ..Default::default()
    };
    let generated = SyntheticGenerator::with_seed(3).catalog(&spec);
    save_catalog(&generated, &path).unwrap();
    store.reload().unwrap();

    let results = service.search(&one_vehicle(10));
    // Every generated listing is at least 10x10, so every location qualifies.
    assert_eq!(results.len(), 30);
    for pair in results.windows(2) {
        assert!(pair[0].total_price_in_cents <= pair[1].total_price_in_cents);
    }
}
