//! Search orchestration: filter, pack, rank.

use crate::feasibility::{self, Infeasibility};
use crate::packer::GridPacker;
use rayon::prelude::*;
use std::fmt;
use u_stow_core::{
    Catalog, CatalogProvider, Error, Location, LocationId, Result, SearchConfig, SearchResult,
    VehicleRequest,
};

/// Why a location is missing from the ranked results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// Ruled out by the feasibility filter.
    Infeasible(Infeasibility),
    /// Passed the filter, but the packer left vehicles without a lane.
    Unplaceable {
        /// Lengths of the vehicles that found no lane.
        vehicle_lengths: Vec<u32>,
    },
    /// The packer failed for another reason.
    Failed {
        /// Error message from the packer.
        message: String,
    },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::Infeasible(reason) => fmt::Display::fmt(reason, f),
            RejectionReason::Unplaceable { vehicle_lengths } => {
                write!(f, "no lane left for vehicles of length {:?}", vehicle_lengths)
            }
            RejectionReason::Failed { message } => write!(f, "packing failed: {}", message),
        }
    }
}

/// A location excluded from the results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// Excluded location.
    pub location_id: LocationId,
    /// Why it was excluded.
    pub reason: RejectionReason,
}

/// Ranked results plus the locations that were excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchReport {
    /// Results, cheapest first.
    pub results: Vec<SearchResult>,
    /// Excluded locations: filter rejections first, then packer rejections,
    /// each group in provider order.
    pub rejections: Vec<Rejection>,
}

impl SearchReport {
    /// Returns the cheapest result, if any.
    pub fn cheapest(&self) -> Option<&SearchResult> {
        self.results.first()
    }

    /// Number of locations examined.
    pub fn examined(&self) -> usize {
        self.results.len() + self.rejections.len()
    }

    /// Locations dropped by the packer after passing the filter.
    pub fn unplaceable(&self) -> impl Iterator<Item = &Rejection> {
        self.rejections
            .iter()
            .filter(|r| matches!(r.reason, RejectionReason::Unplaceable { .. }))
    }
}

/// Orders results by ascending total price. Ties keep their current order.
pub fn rank(results: &mut [SearchResult]) {
    results.sort_by_key(|r| r.total_price_in_cents);
}

/// Searches a catalog provider for locations that can store a vehicle request.
///
/// Each call takes a fresh snapshot from the provider and shares nothing mutable
/// with other calls.
pub struct SearchService<P> {
    provider: P,
    packer: GridPacker,
}

impl<P: CatalogProvider> SearchService<P> {
    /// Creates a service with default configuration.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            packer: GridPacker::default_config(),
        }
    }

    /// Creates a service with the given configuration.
    pub fn with_config(provider: P, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            provider,
            packer: GridPacker::new(config),
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SearchConfig {
        self.packer.config()
    }

    /// Returns the provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns every location that can store the request, cheapest first.
    ///
    /// An empty list means no location qualifies; it is not an error.
    pub fn search(&self, request: &VehicleRequest) -> Vec<SearchResult> {
        self.search_report(request).results
    }

    /// Like [`search`](Self::search), also reporting why locations were excluded.
    pub fn search_report(&self, request: &VehicleRequest) -> SearchReport {
        let snapshot = self.provider.get_all_locations();
        // The config was validated when the service was built.
        run(&self.packer, &snapshot, request)
    }
}

/// Runs filter, packer and ranker over one catalog snapshot.
///
/// Fails if the packer's configuration is invalid.
pub fn search_catalog(
    packer: &GridPacker,
    catalog: &Catalog,
    request: &VehicleRequest,
) -> Result<SearchReport> {
    packer.config().validate()?;
    Ok(run(packer, catalog, request))
}

fn run(packer: &GridPacker, catalog: &Catalog, request: &VehicleRequest) -> SearchReport {
    let unit = packer.config().unit;
    let mut rejections = Vec::new();
    let mut feasible: Vec<&Location> = Vec::with_capacity(catalog.len());

    for location in catalog.locations() {
        match feasibility::check(request, location, unit) {
            Ok(()) => feasible.push(location),
            Err(reason) => {
                log::debug!("location '{}' ruled out: {:?}", location.id(), reason);
                rejections.push(Rejection {
                    location_id: location.id().clone(),
                    reason: RejectionReason::Infeasible(reason),
                });
            }
        }
    }

    // Indexed collect keeps provider order on both paths.
    let packed: Vec<Result<SearchResult>> = if packer.config().parallel {
        feasible
            .par_iter()
            .map(|location| packer.pack(location, request))
            .collect()
    } else {
        feasible
            .iter()
            .map(|location| packer.pack(location, request))
            .collect()
    };

    let mut results = Vec::with_capacity(packed.len());
    for (location, outcome) in feasible.iter().zip(packed) {
        match outcome {
            Ok(result) => results.push(result),
            Err(Error::UnplaceableVehicle {
                location_id,
                vehicle_lengths,
            }) => {
                log::debug!(
                    "location '{}' excluded: vehicles {:?} found no lane",
                    location_id,
                    vehicle_lengths
                );
                rejections.push(Rejection {
                    location_id,
                    reason: RejectionReason::Unplaceable { vehicle_lengths },
                });
            }
            Err(e) => {
                log::warn!("packing location '{}' failed: {}", location.id(), e);
                rejections.push(Rejection {
                    location_id: location.id().clone(),
                    reason: RejectionReason::Failed {
                        message: e.to_string(),
                    },
                });
            }
        }
    }

    rank(&mut results);

    log::debug!(
        "search over {} locations: {} matched, {} excluded",
        catalog.len(),
        results.len(),
        rejections.len()
    );

    SearchReport {
        results,
        rejections,
    }
}
