//! Vehicle requests and their construction-time validation.
//!
//! A [`VehicleRequest`] is only obtainable through its validating constructors, so
//! the search path can assume a non-empty request with positive lengths and
//! quantities. The quantity cap is a caller-layer rule: the packer itself never
//! looks at it.

use crate::config::DEFAULT_MAX_VEHICLES;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// `quantity` identical vehicles of the given length and canonical width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VehicleEntry {
    /// Vehicle length.
    pub length: u32,
    /// Number of vehicles of this length.
    pub quantity: u32,
}

impl VehicleEntry {
    /// Creates a new entry.
    pub fn new(length: u32, quantity: u32) -> Self {
        Self { length, quantity }
    }

    /// Combined length of all vehicles in the entry.
    pub fn total_length(&self) -> u64 {
        u64::from(self.length) * u64::from(self.quantity)
    }
}

/// A validated, non-empty set of vehicles to store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleRequest {
    entries: Vec<VehicleEntry>,
}

impl VehicleRequest {
    /// Builds a request, enforcing the default vehicle cap.
    pub fn new(entries: Vec<VehicleEntry>) -> Result<Self> {
        Self::with_max_vehicles(entries, DEFAULT_MAX_VEHICLES)
    }

    /// Builds a request, enforcing a custom vehicle cap.
    pub fn with_max_vehicles(entries: Vec<VehicleEntry>, max_vehicles: u32) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::InvalidRequest(
                "At least one vehicle entry is required".into(),
            ));
        }

        for (i, entry) in entries.iter().enumerate() {
            if entry.length == 0 {
                return Err(Error::InvalidRequest(format!(
                    "entry {} must have a positive length",
                    i
                )));
            }
            if entry.quantity == 0 {
                return Err(Error::InvalidRequest(format!(
                    "entry {} must have a positive quantity",
                    i
                )));
            }
        }

        let total: u64 = entries.iter().map(|e| u64::from(e.quantity)).sum();
        if total > u64::from(max_vehicles) {
            return Err(Error::InvalidRequest(format!(
                "Total number of vehicles cannot exceed {}",
                max_vehicles
            )));
        }

        Ok(Self { entries })
    }

    /// Returns the entries in request order.
    pub fn entries(&self) -> &[VehicleEntry] {
        &self.entries
    }

    /// Total number of vehicles.
    pub fn vehicle_count(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }

    /// Sum of all vehicle lengths (`Σ length * quantity`).
    pub fn total_length(&self) -> u64 {
        self.entries.iter().map(VehicleEntry::total_length).sum()
    }

    /// Floor area needed when every vehicle is `unit` wide.
    pub fn total_area(&self, unit: u32) -> u64 {
        self.total_length() * u64::from(unit)
    }

    /// Longest single vehicle.
    pub fn max_length(&self) -> u32 {
        self.entries.iter().map(|e| e.length).max().unwrap_or(0)
    }

    /// One length per vehicle, longest first.
    pub fn lengths_descending(&self) -> Vec<u32> {
        let mut lengths: Vec<u32> = self
            .entries
            .iter()
            .flat_map(|e| std::iter::repeat(e.length).take(e.quantity as usize))
            .collect();
        lengths.sort_unstable_by(|a, b| b.cmp(a));
        lengths
    }
}
