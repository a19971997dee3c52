//! Catalog file loading.
//!
//! The persisted catalog is a JSON object mapping each location id to an array of
//! listing records:
//!
//! ```json
//! {
//!   "loc1": [
//!     { "id": "l1", "width": 20, "length": 30, "price_in_cents": 5000 },
//!     { "id": "l2", "width": 40, "length": 50, "price_in_cents": 10000, "location_id": "loc1" }
//!   ]
//! }
//! ```
//!
//! Records without an `id`, or with missing or malformed fields, are skipped with
//! a warning. Locations keep file order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use u_stow_core::{Catalog, Listing, Location};

/// Default catalog file name, resolved against the working directory.
pub const DEFAULT_CATALOG_FILE: &str = "listings_by_location.json";

/// Errors that can occur while reading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog must be a JSON object keyed by location id")]
    NotAnObject,
}

impl From<CatalogError> for u_stow_core::Error {
    fn from(e: CatalogError) -> Self {
        u_stow_core::Error::CatalogUnavailable(e.to_string())
    }
}

/// One listing as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: String,
    pub width: u32,
    pub length: u32,
    pub price_in_cents: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
}

impl From<ListingRecord> for Listing {
    fn from(r: ListingRecord) -> Self {
        let listing = Listing::new(r.id, r.width, r.length, r.price_in_cents);
        match r.location_id {
            Some(location_id) => listing.with_location_id(location_id),
            None => listing,
        }
    }
}

impl From<&Listing> for ListingRecord {
    fn from(l: &Listing) -> Self {
        Self {
            id: l.id().clone(),
            width: l.width(),
            length: l.length(),
            price_in_cents: l.price_in_cents(),
            location_id: l.location_id().cloned(),
        }
    }
}

/// Reads catalog files.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    path: PathBuf,
}

impl CatalogLoader {
    /// Creates a loader for the given file.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Creates a loader for [`DEFAULT_CATALOG_FILE`].
    pub fn default_location() -> Self {
        Self::new(DEFAULT_CATALOG_FILE)
    }

    /// Returns the catalog file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the catalog, degrading to an empty one if the file is missing or unreadable.
    pub fn load(&self) -> Catalog {
        match self.load_strict() {
            Ok(catalog) => catalog,
            Err(e) => {
                log::warn!(
                    "catalog {} unavailable ({}); continuing with an empty catalog",
                    self.path.display(),
                    e
                );
                Catalog::empty()
            }
        }
    }

    /// Loads the catalog, failing if the file is missing or not a JSON object.
    ///
    /// Individual bad records are still skipped.
    pub fn load_strict(&self) -> Result<Catalog, CatalogError> {
        let raw = fs::read_to_string(&self.path)?;
        parse_catalog(&raw)
    }
}

/// Parses catalog JSON, skipping unusable records.
pub fn parse_catalog(json: &str) -> Result<Catalog, CatalogError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Object(entries) = value else {
        return Err(CatalogError::NotAnObject);
    };

    let mut locations = Vec::with_capacity(entries.len());
    for (location_id, records) in entries {
        let Value::Array(records) = records else {
            log::warn!(
                "location '{}' is not an array of listings; skipped",
                location_id
            );
            continue;
        };

        let mut location = Location::new(location_id.as_str());
        for record in records {
            if let Some(listing) = parse_listing(&location_id, record) {
                location = location.with_listing(listing);
            }
        }
        locations.push(location);
    }

    Ok(Catalog::new(locations))
}

fn parse_listing(location_id: &str, record: Value) -> Option<Listing> {
    if !record.as_object().is_some_and(|o| o.contains_key("id")) {
        log::warn!(
            "skipping listing without an id in location '{}'",
            location_id
        );
        return None;
    }

    let record: ListingRecord = match serde_json::from_value(record) {
        Ok(r) => r,
        Err(e) => {
            log::warn!(
                "skipping malformed listing in location '{}': {}",
                location_id,
                e
            );
            return None;
        }
    };

    if let Some(owner) = &record.location_id {
        if owner != location_id {
            log::debug!(
                "listing '{}' names location '{}' but is filed under '{}'",
                record.id,
                owner,
                location_id
            );
        }
    }

    let listing = Listing::from(record);
    if let Err(e) = listing.validate() {
        log::warn!("skipping listing in location '{}': {}", location_id, e);
        return None;
    }
    Some(listing)
}

/// Serializes a catalog into the on-disk format.
pub fn to_json_string(catalog: &Catalog) -> Result<String, CatalogError> {
    let mut map = Map::with_capacity(catalog.len());
    for location in catalog.locations() {
        let records: Vec<ListingRecord> =
            location.listings().iter().map(ListingRecord::from).collect();
        map.insert(location.id().clone(), serde_json::to_value(records)?);
    }
    Ok(serde_json::to_string_pretty(&Value::Object(map))?)
}

/// Writes a catalog file, creating parent directories as needed.
pub fn save_catalog(catalog: &Catalog, path: impl AsRef<Path>) -> Result<(), CatalogError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, to_json_string(catalog)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "loc1": [
            {"id": "l1", "width": 20, "length": 30, "price_in_cents": 5000},
            {"id": "l2", "width": 40, "length": 50, "price_in_cents": 10000, "location_id": "loc1"}
        ],
        "loc2": [
            {"id": "l3", "width": 10, "length": 20, "price_in_cents": 3000}
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.listing_count(), 3);

        let ids: Vec<&str> = catalog.locations().iter().map(|l| l.id().as_str()).collect();
        assert_eq!(ids, vec!["loc1", "loc2"]);

        let l2 = catalog.get("loc1").unwrap().listing("l2").unwrap();
        assert_eq!(l2.area(), 2000);
        assert_eq!(l2.location_id().map(String::as_str), Some("loc1"));
    }

    #[test]
    fn test_incomplete_entries_skipped() {
        let json = r#"{
            "loc1": [
                {"width": 20, "length": 30, "price_in_cents": 5000},
                {"id": "l2", "width": 40, "price_in_cents": 10000},
                {"id": "l3", "width": "wide", "length": 10, "price_in_cents": 1},
                {"id": "l4", "width": 0, "length": 10, "price_in_cents": 1},
                "not an object",
                {"id": "l5", "width": 10, "length": 20, "price_in_cents": 3000}
            ]
        }"#;
        let catalog = parse_catalog(json).unwrap();
        let location = catalog.get("loc1").unwrap();
        assert_eq!(location.listings().len(), 1);
        assert_eq!(location.listings()[0].id(), "l5");
    }

    #[test]
    fn test_non_array_location_skipped() {
        let json = r#"{"bad": {"id": "x"}, "good": []}"#;
        let catalog = parse_catalog(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("good").unwrap().is_empty());
    }

    #[test]
    fn test_top_level_must_be_object() {
        assert!(matches!(
            parse_catalog("[1, 2, 3]"),
            Err(CatalogError::NotAnObject)
        ));
        assert!(matches!(parse_catalog("{ nope"), Err(CatalogError::Json(_))));
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        let json = to_json_string(&catalog).unwrap();
        assert_eq!(parse_catalog(&json).unwrap(), catalog);
    }

    #[test]
    fn test_catalog_error_maps_to_unavailable() {
        let err: u_stow_core::Error = CatalogError::NotAnObject.into();
        assert!(matches!(err, u_stow_core::Error::CatalogUnavailable(_)));
    }
}
