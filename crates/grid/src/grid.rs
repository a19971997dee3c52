//! Lane grid for a single listing.
//!
//! A listing is cut into `unit`-wide lanes along its shorter side; each lane is
//! `rows` cells deep along the longer side. Vehicles are parked end to end within
//! a lane, so each lane reduces to a one-dimensional bin.

use u_stow_core::Listing;

/// Remaining depth, in cells, of every lane of one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingGrid {
    /// Position of the listing in the location's catalog order.
    listing_index: usize,
    /// Cells per lane.
    rows: u32,
    /// Remaining cells per lane.
    lanes: Vec<u32>,
}

impl ListingGrid {
    /// Builds an empty grid for `listing`.
    pub fn new(listing_index: usize, listing: &Listing, unit: u32) -> Self {
        let rows = listing.long_side() / unit;
        let cols = listing.short_side() / unit;
        Self {
            listing_index,
            rows,
            lanes: vec![rows; cols as usize],
        }
    }

    /// Returns the index of the listing this grid was built from.
    pub fn listing_index(&self) -> usize {
        self.listing_index
    }

    /// Returns the lane depth in cells.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Returns the number of lanes.
    pub fn cols(&self) -> usize {
        self.lanes.len()
    }

    /// Returns the remaining cells per lane.
    pub fn lanes(&self) -> &[u32] {
        &self.lanes
    }

    /// Total free cells across all lanes.
    pub fn free_cells(&self) -> u64 {
        self.lanes.iter().map(|&c| u64::from(c)).sum()
    }

    /// Parks a vehicle of `cells` in the first lane with room, returning the lane index.
    pub fn place(&mut self, cells: u32) -> Option<usize> {
        let lane = self.lanes.iter().position(|&remaining| remaining >= cells)?;
        self.lanes[lane] -= cells;
        Some(lane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_dimensions() {
        // Longer side drives depth, shorter side drives lane count.
        let grid = ListingGrid::new(0, &Listing::new("l2", 40, 50, 10000), 10);
        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.free_cells(), 20);

        let rotated = ListingGrid::new(0, &Listing::new("l2", 50, 40, 10000), 10);
        assert_eq!(rotated.rows(), 5);
        assert_eq!(rotated.cols(), 4);
    }

    #[test]
    fn test_partial_cells_are_dropped() {
        let grid = ListingGrid::new(0, &Listing::new("l", 19, 35, 1), 10);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 1);
    }

    #[test]
    fn test_narrow_listing_has_no_lanes() {
        let mut grid = ListingGrid::new(0, &Listing::new("l", 9, 100, 1), 10);
        assert_eq!(grid.cols(), 0);
        assert_eq!(grid.place(1), None);
    }

    #[test]
    fn test_place_first_fit() {
        let mut grid = ListingGrid::new(3, &Listing::new("l1", 20, 30, 5000), 10);
        assert_eq!(grid.lanes(), &[3, 3]);

        assert_eq!(grid.place(2), Some(0));
        assert_eq!(grid.place(2), Some(1));
        assert_eq!(grid.place(1), Some(0));
        assert_eq!(grid.lanes(), &[0, 1]);
        assert_eq!(grid.place(2), None);
        assert_eq!(grid.place(1), Some(1));
        assert_eq!(grid.free_cells(), 0);
        assert_eq!(grid.listing_index(), 3);
    }
}
