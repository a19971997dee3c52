//! # U-Stow Grid
//!
//! Placement and ranking for the U-Stow vehicle storage search.
//!
//! A search runs three stages over one catalog snapshot:
//!
//! 1. **Feasibility filter** ([`can_fit`]): cheap necessary conditions (floor area,
//!    longest vehicle, lane length in both orientations) that prune hopeless
//!    locations.
//! 2. **Grid packer** ([`GridPacker`]): each listing becomes `unit`-wide lanes along
//!    its shorter side; vehicles are parked longest first into the first lane with
//!    room, scanning listings largest area first. A listing's price is charged once,
//!    when it receives its first vehicle.
//! 3. **Ranker** ([`rank`]): stable sort by total price.
//!
//! Locations where the packer leaves a vehicle without a lane are excluded from the
//! results and reported through [`SearchReport::rejections`].
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use u_stow_grid::{Catalog, Listing, Location, SearchService, VehicleEntry, VehicleRequest};
//!
//! let catalog = Arc::new(Catalog::new(vec![
//!     Location::new("loc1")
//!         .with_listing(Listing::new("l1", 20, 30, 5000))
//!         .with_listing(Listing::new("l2", 40, 50, 10000)),
//!     Location::new("loc2").with_listing(Listing::new("l3", 10, 20, 3000)),
//! ]));
//!
//! let service = SearchService::new(catalog);
//! let request = VehicleRequest::new(vec![VehicleEntry::new(20, 1)]).unwrap();
//! let results = service.search(&request);
//!
//! assert_eq!(results[0].location_id, "loc2");
//! assert_eq!(results[0].total_price_in_cents, 3000);
//! ```

pub mod feasibility;
pub mod grid;
pub mod packer;
pub mod search;

// Re-exports
pub use feasibility::{can_fit, Infeasibility};
pub use grid::ListingGrid;
pub use packer::{GridPacker, PackOutcome, Selection, VehiclePlacement};
pub use search::{rank, search_catalog, Rejection, RejectionReason, SearchReport, SearchService};
pub use u_stow_core::{
    Catalog, CatalogProvider, Error, Listing, Location, Result, SearchConfig, SearchResult,
    VehicleEntry, VehicleRequest,
};
