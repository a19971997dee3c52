//! Search configuration.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Canonical vehicle width, also the grid cell size.
pub const DEFAULT_VEHICLE_WIDTH: u32 = 10;

/// Default cap on the number of vehicles in one request.
pub const DEFAULT_MAX_VEHICLES: u32 = 5;

/// Common configuration for searches.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchConfig {
    /// Vehicle width and grid cell size, in catalog length units.
    pub unit: u32,

    /// Maximum total vehicle quantity accepted by request validation.
    pub max_vehicles: u32,

    /// Pack surviving locations on the rayon thread pool.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            unit: DEFAULT_VEHICLE_WIDTH,
            max_vehicles: DEFAULT_MAX_VEHICLES,
            parallel: false,
        }
    }
}

impl SearchConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the grid unit.
    pub fn with_unit(mut self, unit: u32) -> Self {
        self.unit = unit;
        self
    }

    /// Sets the request vehicle cap.
    pub fn with_max_vehicles(mut self, max_vehicles: u32) -> Self {
        self.max_vehicles = max_vehicles;
        self
    }

    /// Enables or disables parallel packing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of grid cells a vehicle of `length` occupies along a lane.
    pub fn cells_for(&self, length: u32) -> u32 {
        length.div_ceil(self.unit)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.unit == 0 {
            return Err(Error::InvalidRequest("grid unit must be positive".into()));
        }
        if self.max_vehicles == 0 {
            return Err(Error::InvalidRequest(
                "vehicle cap must allow at least one vehicle".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::new();
        assert_eq!(config.unit, 10);
        assert_eq!(config.max_vehicles, 5);
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cells_for_rounds_up() {
        let config = SearchConfig::new();
        assert_eq!(config.cells_for(20), 2);
        assert_eq!(config.cells_for(21), 3);
        assert_eq!(config.cells_for(5), 1);
    }

    #[test]
    fn test_builder() {
        let config = SearchConfig::new()
            .with_unit(5)
            .with_max_vehicles(8)
            .with_parallel(true);
        assert_eq!(config.cells_for(12), 3);
        assert_eq!(config.max_vehicles, 8);
        assert!(config.parallel);
    }

    #[test]
    fn test_zero_unit_rejected() {
        assert!(SearchConfig::new().with_unit(0).validate().is_err());
    }
}
