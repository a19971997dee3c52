//! # U-Stow Core
//!
//! Core records and abstractions for the U-Stow vehicle storage search.
//!
//! This crate provides the types shared by the packer, the catalog loader and
//! the command-line front end.
//!
//! ## Core Components
//!
//! - **Catalog records**: [`Listing`], [`Location`], [`Catalog`]
//! - **Snapshot seam**: [`CatalogProvider`] - hands each search an immutable catalog
//! - **Requests**: [`VehicleEntry`], [`VehicleRequest`] - validated at construction
//! - **Results**: [`SearchResult`]
//! - **Configuration**: [`SearchConfig`]
//!
//! ## Configuration
//!
//! ```rust
//! use u_stow_core::SearchConfig;
//!
//! let config = SearchConfig::new()
//!     .with_unit(10)
//!     .with_max_vehicles(5)
//!     .with_parallel(false);
//! assert_eq!(config.cells_for(25), 3);
//! ```
//!
//! ## Requests
//!
//! ```rust
//! use u_stow_core::{VehicleEntry, VehicleRequest};
//!
//! let request = VehicleRequest::new(vec![
//!     VehicleEntry::new(20, 2),
//!     VehicleEntry::new(30, 1),
//! ])
//! .unwrap();
//! assert_eq!(request.lengths_descending(), vec![30, 20, 20]);
//!
//! assert!(VehicleRequest::new(vec![]).is_err());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod request;
pub mod result;

// Re-exports
pub use catalog::{Catalog, CatalogProvider};
pub use config::{SearchConfig, DEFAULT_MAX_VEHICLES, DEFAULT_VEHICLE_WIDTH};
pub use error::{Error, Result};
pub use model::{Listing, ListingId, Location, LocationId};
pub use request::{VehicleEntry, VehicleRequest};
pub use result::SearchResult;
