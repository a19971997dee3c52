//! First-Fit-Decreasing lane packer.

use crate::grid::ListingGrid;
use std::collections::HashSet;
use u_stow_core::{
    Error, Listing, ListingId, Location, LocationId, Result, SearchConfig, SearchResult,
    VehicleRequest,
};

/// Where one vehicle ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehiclePlacement {
    /// Vehicle length.
    pub vehicle_length: u32,
    /// Listing the vehicle was parked in.
    pub listing_id: ListingId,
    /// Lane index within the listing.
    pub lane: usize,
    /// Cells the vehicle occupies in the lane.
    pub cells: u32,
}

/// Listings charged so far and their running price.
///
/// Each listing id is charged at most once, the first time it receives a vehicle,
/// even if the location lists the same id twice. The price saturates at `u64::MAX`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    listing_ids: Vec<ListingId>,
    charged: HashSet<ListingId>,
    total_price_in_cents: u64,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Charges `listing` unless its id already is. Returns true if newly charged.
    pub fn charge(&mut self, listing: &Listing) -> bool {
        if !self.charged.insert(listing.id().clone()) {
            return false;
        }
        self.listing_ids.push(listing.id().clone());
        self.total_price_in_cents = self
            .total_price_in_cents
            .saturating_add(listing.price_in_cents());
        true
    }

    /// Returns the selected listing ids, in order of first use.
    pub fn listing_ids(&self) -> &[ListingId] {
        &self.listing_ids
    }

    /// Returns the accumulated price.
    pub fn total_price_in_cents(&self) -> u64 {
        self.total_price_in_cents
    }
}

/// Full outcome of packing one location, including vehicles left without a lane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackOutcome {
    /// Location that was packed.
    pub location_id: LocationId,
    /// Listings used and their price.
    pub selection: Selection,
    /// Placement of every seated vehicle, in packing order.
    pub placements: Vec<VehiclePlacement>,
    /// Lengths of vehicles that found no lane.
    pub unplaced: Vec<u32>,
}

impl PackOutcome {
    /// Returns true if every vehicle was seated.
    pub fn all_placed(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Converts into a search result, failing if any vehicle was left out.
    pub fn into_result(self) -> Result<SearchResult> {
        if !self.all_placed() {
            return Err(Error::UnplaceableVehicle {
                location_id: self.location_id,
                vehicle_lengths: self.unplaced,
            });
        }
        Ok(SearchResult {
            location_id: self.location_id,
            listing_ids: self.selection.listing_ids,
            total_price_in_cents: self.selection.total_price_in_cents,
        })
    }
}

/// Grid-based First-Fit-Decreasing packer.
///
/// Listings are offered largest area first so vehicles consolidate into fewer
/// spaces; vehicles are placed longest first to limit fragmentation.
#[derive(Debug, Clone, Default)]
pub struct GridPacker {
    config: SearchConfig,
}

impl GridPacker {
    /// Creates a new packer with the given configuration.
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Creates a packer with default configuration.
    pub fn default_config() -> Self {
        Self::new(SearchConfig::default())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Packs `request` into `location` and returns the selected listings.
    ///
    /// Fails with [`Error::UnplaceableVehicle`] when a vehicle finds no lane; the
    /// caller decides what to do with that location.
    pub fn pack(&self, location: &Location, request: &VehicleRequest) -> Result<SearchResult> {
        self.place(location, request)?.into_result()
    }

    /// Packs `request` into `location`, reporting every placement and leftover.
    pub fn place(&self, location: &Location, request: &VehicleRequest) -> Result<PackOutcome> {
        self.config.validate()?;
        let unit = self.config.unit;
        let listings = location.listings();

        // Stable: equal areas keep catalog order.
        let mut order: Vec<usize> = (0..listings.len()).collect();
        order.sort_by(|&a, &b| listings[b].area().cmp(&listings[a].area()));

        let mut grids: Vec<ListingGrid> = order
            .iter()
            .map(|&i| ListingGrid::new(i, &listings[i], unit))
            .collect();

        let mut selection = Selection::new();
        let mut placements = Vec::with_capacity(request.vehicle_count() as usize);
        let mut unplaced = Vec::new();

        for vehicle_length in request.lengths_descending() {
            let cells = self.config.cells_for(vehicle_length);
            let spot = grids.iter_mut().find_map(|grid| {
                grid.place(cells)
                    .map(|lane| (grid.listing_index(), lane))
            });

            match spot {
                Some((index, lane)) => {
                    let listing = &listings[index];
                    selection.charge(listing);
                    placements.push(VehiclePlacement {
                        vehicle_length,
                        listing_id: listing.id().clone(),
                        lane,
                        cells,
                    });
                }
                None => {
                    log::debug!(
                        "no lane with {} free cells for vehicle of length {} in location '{}'",
                        cells,
                        vehicle_length,
                        location.id()
                    );
                    unplaced.push(vehicle_length);
                }
            }
        }

        Ok(PackOutcome {
            location_id: location.id().clone(),
            selection,
            placements,
            unplaced,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use u_stow_core::VehicleEntry;

    fn request(entries: &[(u32, u32)]) -> VehicleRequest {
        VehicleRequest::new(
            entries
                .iter()
                .map(|&(length, quantity)| VehicleEntry::new(length, quantity))
                .collect(),
        )
        .unwrap()
    }

    fn loc1() -> Location {
        Location::new("loc1")
            .with_listing(Listing::new("l1", 20, 30, 5000))
            .with_listing(Listing::new("l2", 40, 50, 10000))
    }

    #[test]
    fn test_largest_listing_offered_first() {
        let packer = GridPacker::default_config();
        let result = packer.pack(&loc1(), &request(&[(20, 1)])).unwrap();

        assert_eq!(result.location_id, "loc1");
        assert_eq!(result.listing_ids, vec!["l2".to_string()]);
        assert_eq!(result.total_price_in_cents, 10000);
    }

    #[test]
    fn test_single_listing_location() {
        let location = Location::new("loc2").with_listing(Listing::new("l3", 10, 20, 3000));
        let packer = GridPacker::default_config();
        let result = packer.pack(&location, &request(&[(20, 1)])).unwrap();

        assert_eq!(result.listing_ids, vec!["l3".to_string()]);
        assert_eq!(result.total_price_in_cents, 3000);
    }

    #[test]
    fn test_mixed_request_consolidates() {
        // l2 is 4 lanes x 5 cells: 30 -> lane 0 (2 left), 20 -> lane 0, 20 -> lane 1.
        let packer = GridPacker::default_config();
        let outcome = packer.place(&loc1(), &request(&[(20, 2), (30, 1)])).unwrap();

        assert!(outcome.all_placed());
        let lanes: Vec<(u32, &str, usize)> = outcome
            .placements
            .iter()
            .map(|p| (p.vehicle_length, p.listing_id.as_str(), p.lane))
            .collect();
        assert_eq!(lanes, vec![(30, "l2", 0), (20, "l2", 0), (20, "l2", 1)]);
        assert_eq!(outcome.selection.total_price_in_cents(), 10000);
    }

    #[test]
    fn test_listing_charged_once() {
        let location = Location::new("loc").with_listing(Listing::new("l1", 20, 30, 5000));
        let packer = GridPacker::default_config();
        let result = packer.pack(&location, &request(&[(10, 3)])).unwrap();

        assert_eq!(result.listing_ids, vec!["l1".to_string()]);
        assert_eq!(result.total_price_in_cents, 5000);
    }

    #[test]
    fn test_spill_into_second_listing() {
        // big: 2 lanes x 2 cells (area 400); small: 1 lane x 3 cells (area 300).
        let location = Location::new("loc")
            .with_listing(Listing::new("small", 10, 30, 50))
            .with_listing(Listing::new("big", 20, 20, 100));
        let packer = GridPacker::default_config();
        let result = packer.pack(&location, &request(&[(30, 1), (20, 1)])).unwrap();

        // 30 needs 3 cells and only fits the smaller listing; 20 then takes the big one.
        assert_eq!(
            result.listing_ids,
            vec!["small".to_string(), "big".to_string()]
        );
        assert_eq!(result.total_price_in_cents, 150);
    }

    #[test]
    fn test_equal_areas_keep_catalog_order() {
        let location = Location::new("loc")
            .with_listing(Listing::new("first", 20, 20, 700))
            .with_listing(Listing::new("second", 20, 20, 100));
        let packer = GridPacker::default_config();
        let result = packer.pack(&location, &request(&[(20, 1)])).unwrap();
        assert_eq!(result.listing_ids, vec!["first".to_string()]);
    }

    #[test]
    fn test_unplaceable_vehicle_is_an_error() {
        // Passes every filter check, but the only 2-cell-deep listing is 5 wide.
        let location = Location::new("tight")
            .with_listing(Listing::new("a", 15, 15, 1))
            .with_listing(Listing::new("b", 5, 25, 1));
        let packer = GridPacker::default_config();

        let outcome = packer.place(&location, &request(&[(20, 1)])).unwrap();
        assert_eq!(outcome.unplaced, vec![20]);

        match packer.pack(&location, &request(&[(20, 1)])) {
            Err(Error::UnplaceableVehicle {
                location_id,
                vehicle_lengths,
            }) => {
                assert_eq!(location_id, "tight");
                assert_eq!(vehicle_lengths, vec![20]);
            }
            other => panic!("expected UnplaceableVehicle, got {:?}", other),
        }
    }

    #[test]
    fn test_partial_fit_reports_only_leftovers() {
        let location = Location::new("loc").with_listing(Listing::new("l", 10, 40, 900));
        let packer = GridPacker::default_config();
        let outcome = packer.place(&location, &request(&[(30, 1), (20, 1)])).unwrap();

        assert_eq!(outcome.placements.len(), 1);
        assert_eq!(outcome.unplaced, vec![20]);
        assert!(outcome.into_result().is_err());
    }

    #[test]
    fn test_no_quantity_cap_in_packer() {
        let location = Location::new("lot").with_listing(Listing::new("l", 60, 10, 400));
        let six = VehicleRequest::with_max_vehicles(vec![VehicleEntry::new(10, 6)], u32::MAX)
            .unwrap();
        let result = GridPacker::default_config().pack(&location, &six).unwrap();
        assert_eq!(result.total_price_in_cents, 400);
    }

    #[test]
    fn test_duplicate_listing_id_charged_once() {
        // Two vehicles spread over both copies of "x"; the id is billed once.
        let location = Location::new("loc")
            .with_listing(Listing::new("x", 10, 20, 100))
            .with_listing(Listing::new("x", 10, 20, 100));
        let packer = GridPacker::default_config();
        let outcome = packer.place(&location, &request(&[(20, 2)])).unwrap();
        assert_eq!(outcome.placements.len(), 2);

        let result = outcome.into_result().unwrap();
        assert_eq!(result.listing_ids, vec!["x".to_string()]);
        assert_eq!(result.total_price_in_cents, 100);
    }

    #[test]
    fn test_price_saturates() {
        let location = Location::new("loc")
            .with_listing(Listing::new("a", 10, 20, u64::MAX))
            .with_listing(Listing::new("b", 10, 20, 5));
        let packer = GridPacker::default_config();
        let result = packer.pack(&location, &request(&[(20, 2)])).unwrap();
        assert_eq!(result.listing_ids.len(), 2);
        assert_eq!(result.total_price_in_cents, u64::MAX);
    }

    #[test]
    fn test_custom_unit() {
        // With a 5-unit grid the 10x20 listing has 2 lanes of 4 cells.
        let location = Location::new("loc").with_listing(Listing::new("l", 10, 20, 10));
        let packer = GridPacker::new(SearchConfig::new().with_unit(5));
        let result = packer.pack(&location, &request(&[(20, 2)])).unwrap();
        assert_eq!(result.listing_ids, vec!["l".to_string()]);
    }

    #[test]
    fn test_zero_unit_rejected() {
        let packer = GridPacker::new(SearchConfig::new().with_unit(0));
        assert!(packer.pack(&loc1(), &request(&[(20, 1)])).is_err());
    }
}
