//! Storage catalog records: listings and the locations that own them.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for a listing.
pub type ListingId = String;

/// Unique identifier for a location.
pub type LocationId = String;

/// A rentable rectangular space inside a location.
///
/// Dimensions share one linear unit (feet in the shipped catalog); the price is in
/// the smallest currency unit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Listing {
    id: ListingId,
    width: u32,
    length: u32,
    price_in_cents: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    location_id: Option<LocationId>,
}

impl Listing {
    /// Creates a new listing.
    pub fn new(id: impl Into<ListingId>, width: u32, length: u32, price_in_cents: u64) -> Self {
        Self {
            id: id.into(),
            width,
            length,
            price_in_cents,
            location_id: None,
        }
    }

    /// Records the owning location as stated by the catalog source.
    pub fn with_location_id(mut self, location_id: impl Into<LocationId>) -> Self {
        self.location_id = Some(location_id.into());
        self
    }

    /// Returns the listing identifier.
    pub fn id(&self) -> &ListingId {
        &self.id
    }

    /// Returns the width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the length.
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Returns the rental price in cents.
    pub fn price_in_cents(&self) -> u64 {
        self.price_in_cents
    }

    /// Returns the location id carried by the source record, if any.
    pub fn location_id(&self) -> Option<&LocationId> {
        self.location_id.as_ref()
    }

    /// Returns the floor area (`width * length`).
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.length)
    }

    /// Returns the longer side.
    pub fn long_side(&self) -> u32 {
        self.width.max(self.length)
    }

    /// Returns the shorter side.
    pub fn short_side(&self) -> u32 {
        self.width.min(self.length)
    }

    /// Validates the listing and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::InvalidListing("listing id must not be empty".into()));
        }
        if self.width == 0 || self.length == 0 {
            return Err(Error::InvalidListing(format!(
                "listing '{}' must have positive width and length",
                self.id
            )));
        }
        Ok(())
    }
}

/// A storage location and the listings it offers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    id: LocationId,
    listings: Vec<Listing>,
}

impl Location {
    /// Creates an empty location.
    pub fn new(id: impl Into<LocationId>) -> Self {
        Self {
            id: id.into(),
            listings: Vec::new(),
        }
    }

    /// Adds a listing.
    pub fn with_listing(mut self, listing: Listing) -> Self {
        self.listings.push(listing);
        self
    }

    /// Adds several listings.
    pub fn with_listings(mut self, listings: impl IntoIterator<Item = Listing>) -> Self {
        self.listings.extend(listings);
        self
    }

    /// Returns the location identifier.
    pub fn id(&self) -> &LocationId {
        &self.id
    }

    /// Returns the listings in catalog order.
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Returns true if the location has no listings.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Returns the listing with the given id.
    pub fn listing(&self, id: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    /// Sum of listing areas, 0 when empty.
    pub fn total_area(&self) -> u64 {
        self.listings.iter().map(Listing::area).sum()
    }

    /// Largest listing length, `None` when empty.
    pub fn max_listing_length(&self) -> Option<u32> {
        self.listings.iter().map(Listing::length).max()
    }

    /// Largest listing width, `None` when empty.
    pub fn max_listing_width(&self) -> Option<u32> {
        self.listings.iter().map(Listing::width).max()
    }
}
