//! Search result representation.

use crate::model::{ListingId, LocationId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The listings one location needs to store a whole request, and their cost.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchResult {
    /// Location the listings belong to.
    pub location_id: LocationId,

    /// Selected listings, in the order they first received a vehicle. No duplicates.
    pub listing_ids: Vec<ListingId>,

    /// Sum of the selected listings' prices, each counted once.
    pub total_price_in_cents: u64,
}

impl SearchResult {
    /// Creates a result with no listings selected.
    pub fn new(location_id: impl Into<LocationId>) -> Self {
        Self {
            location_id: location_id.into(),
            listing_ids: Vec::new(),
            total_price_in_cents: 0,
        }
    }

    /// Returns the number of selected listings.
    pub fn listing_count(&self) -> usize {
        self.listing_ids.len()
    }

    /// Returns true if the listing is part of the selection.
    pub fn contains(&self, listing_id: &str) -> bool {
        self.listing_ids.iter().any(|id| id == listing_id)
    }

    /// Formats the price as a decimal currency amount (e.g. `"30.00"`).
    pub fn price_display(&self) -> String {
        format!(
            "{}.{:02}",
            self.total_price_in_cents / 100,
            self.total_price_in_cents % 100
        )
    }
}
