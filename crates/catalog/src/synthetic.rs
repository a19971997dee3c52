//! Synthetic catalog generator.
//!
//! Produces reproducible catalogs for load testing and demos.

use rand::prelude::*;
use u_stow_core::{Catalog, Listing, Location};

/// Shape of the generated catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticSpec {
    /// Number of locations.
    pub locations: usize,
    /// Maximum listings per location (at least one is generated).
    pub max_listings: usize,
    /// Dimensions are multiples of this step.
    pub step: u32,
    /// Largest dimension, in steps.
    pub max_steps: u32,
    /// Price range in cents, inclusive.
    pub price_range: (u64, u64),
}

impl Default for SyntheticSpec {
    fn default() -> Self {
        Self {
            locations: 100,
            max_listings: 6,
            step: 10,
            max_steps: 10,
            price_range: (1_000, 50_000),
        }
    }
}

/// Generator for synthetic catalogs.
#[derive(Debug, Clone)]
pub struct SyntheticGenerator {
    rng: StdRng,
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticGenerator {
    /// Creates a new generator with a random seed.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new generator with a specific seed for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates a catalog.
    ///
    /// Listing ids are unique across the catalog and each listing records its
    /// owning location.
    pub fn catalog(&mut self, spec: &SyntheticSpec) -> Catalog {
        let step = spec.step.max(1);
        let max_steps = spec.max_steps.max(1);
        let max_listings = spec.max_listings.max(1);
        let (low, high) = spec.price_range;
        let (low, high) = (low.min(high), low.max(high));

        let mut next_listing = 0usize;
        let mut locations = Vec::with_capacity(spec.locations);
        for i in 0..spec.locations {
            let location_id = format!("loc{}", i + 1);
            let count = self.rng.gen_range(1..=max_listings);
            let mut location = Location::new(location_id.as_str());
            for _ in 0..count {
                next_listing += 1;
                let listing = Listing::new(
                    format!("L{}", next_listing),
                    self.rng.gen_range(1..=max_steps) * step,
                    self.rng.gen_range(1..=max_steps) * step,
                    self.rng.gen_range(low..=high),
                )
                .with_location_id(location_id.as_str());
                location = location.with_listing(listing);
            }
            locations.push(location);
        }

        log::debug!(
            "generated {} locations with {} listings",
            locations.len(),
            next_listing
        );
        Catalog::new(locations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_catalog() {
        let spec = SyntheticSpec {
            locations: 20,
            ..Default::default()
        };
        let a = SyntheticGenerator::with_seed(7).catalog(&spec);
        let b = SyntheticGenerator::with_seed(7).catalog(&spec);
        assert_eq!(a, b);
        assert_eq!(a.len(), 20);
    }

    #[test]
    fn test_generated_catalog_is_valid() {
        let spec = SyntheticSpec {
            locations: 50,
            max_listings: 4,
            step: 5,
            max_steps: 8,
            price_range: (100, 900),
        };
        let catalog = SyntheticGenerator::with_seed(42).catalog(&spec);
        catalog.validate().unwrap();

        for location in catalog.locations() {
            assert!(!location.is_empty());
            assert!(location.listings().len() <= 4);
            for listing in location.listings() {
                assert_eq!(listing.width() % 5, 0);
                assert!(listing.length() <= 40);
                assert!((100..=900).contains(&listing.price_in_cents()));
                assert_eq!(listing.location_id(), Some(location.id()));
            }
        }
    }
}
