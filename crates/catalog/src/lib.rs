//! # U-Stow Catalog
//!
//! Catalog persistence for U-Stow.
//!
//! - [`CatalogLoader`] reads the JSON catalog file, skipping unusable records
//! - [`CatalogStore`] serves immutable snapshots and swaps them on reload
//! - [`SyntheticGenerator`] builds reproducible catalogs for testing
//!
//! ## Example
//!
//! ```rust
//! use u_stow_catalog::parse_catalog;
//!
//! let catalog = parse_catalog(r#"{
//!     "loc1": [{"id": "l1", "width": 20, "length": 30, "price_in_cents": 5000}]
//! }"#).unwrap();
//! assert_eq!(catalog.listing_count(), 1);
//! ```

pub mod loader;
pub mod store;
pub mod synthetic;

pub use loader::{
    parse_catalog, save_catalog, to_json_string, CatalogError, CatalogLoader, ListingRecord,
    DEFAULT_CATALOG_FILE,
};
pub use store::CatalogStore;
pub use synthetic::{SyntheticGenerator, SyntheticSpec};
