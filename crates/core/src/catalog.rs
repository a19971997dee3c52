//! Immutable catalog snapshots and the provider seam searches read them from.

use crate::model::Location;
use crate::{Error, Result};
use std::collections::HashSet;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A read-only set of locations, in provider order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Catalog {
    locations: Vec<Location>,
}

impl Catalog {
    /// Creates a catalog from locations.
    pub fn new(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    /// Creates an empty catalog.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the locations in provider order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Returns the number of locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns true if there are no locations.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Looks up a location by id.
    pub fn get(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id() == id)
    }

    /// Total number of listings across all locations.
    pub fn listing_count(&self) -> usize {
        self.locations.iter().map(|l| l.listings().len()).sum()
    }

    /// Checks listing dimensions and id uniqueness.
    pub fn validate(&self) -> Result<()> {
        let mut location_ids = HashSet::new();
        let mut listing_ids = HashSet::new();
        for location in &self.locations {
            if !location_ids.insert(location.id().as_str()) {
                return Err(Error::InvalidListing(format!(
                    "duplicate location id '{}'",
                    location.id()
                )));
            }
            for listing in location.listings() {
                listing.validate()?;
                if !listing_ids.insert(listing.id().as_str()) {
                    return Err(Error::InvalidListing(format!(
                        "duplicate listing id '{}'",
                        listing.id()
                    )));
                }
            }
        }
        Ok(())
    }
}

impl FromIterator<Location> for Catalog {
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Source of catalog snapshots.
///
/// Each call hands out a snapshot that never changes afterwards; a search holds
/// on to the one it started with even if the provider reloads meanwhile.
pub trait CatalogProvider: Send + Sync {
    /// Returns the current set of locations.
    fn get_all_locations(&self) -> Arc<Catalog>;
}

impl CatalogProvider for Arc<Catalog> {
    fn get_all_locations(&self) -> Arc<Catalog> {
        Arc::clone(self)
    }
}

impl<P: CatalogProvider + ?Sized> CatalogProvider for &P {
    fn get_all_locations(&self) -> Arc<Catalog> {
        (**self).get_all_locations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Listing;

    fn sample() -> Catalog {
        Catalog::new(vec![
            Location::new("loc1")
                .with_listing(Listing::new("l1", 20, 30, 5000))
                .with_listing(Listing::new("l2", 40, 50, 10000)),
            Location::new("loc2").with_listing(Listing::new("l3", 10, 20, 3000)),
        ])
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = sample();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.listing_count(), 3);
        assert_eq!(catalog.get("loc2").map(|l| l.listings().len()), Some(1));
        assert!(catalog.get("nope").is_none());
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_duplicate_listing_rejected() {
        let catalog = Catalog::new(vec![
            Location::new("a").with_listing(Listing::new("x", 10, 10, 1)),
            Location::new("b").with_listing(Listing::new("x", 10, 10, 1)),
        ]);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_arc_provider_shares_snapshot() {
        let provider = Arc::new(sample());
        let a = provider.get_all_locations();
        let b = provider.get_all_locations();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
