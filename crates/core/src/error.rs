//! Error types shared across the U-Stow crates.

use thiserror::Error;

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating requests, loading catalogs, or packing vehicles.
#[derive(Debug, Error)]
pub enum Error {
    /// The vehicle request violates a construction rule (empty, zero values, quantity cap).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A listing or location record is unusable.
    #[error("invalid listing: {0}")]
    InvalidListing(String),

    /// The backing catalog could not be read or parsed.
    #[error("catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// The packer could not seat every vehicle in the location's listings.
    #[error("location '{location_id}' cannot seat vehicles of length {vehicle_lengths:?}")]
    UnplaceableVehicle {
        /// Location that was being packed.
        location_id: String,
        /// Lengths of the vehicles left without a lane.
        vehicle_lengths: Vec<u32>,
    },

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true for errors caused by the caller's request rather than the catalog.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidRequest(_))
    }
}
