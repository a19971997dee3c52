//! Cheap necessary-condition checks run before the packer.
//!
//! A location that fails any check can never seat the request, so the packer is
//! skipped for it. Passing is not a guarantee: the packer may still leave a
//! vehicle without a lane.

use std::fmt;
use u_stow_core::{Location, VehicleRequest};

/// Why a location was ruled out before packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Infeasibility {
    /// The grid unit is zero, so no lane can be laid out.
    ZeroUnit,
    /// The location has no listings.
    NoListings,
    /// The request needs more floor area than the location has.
    AreaExceeded {
        /// Area the request needs.
        required: u64,
        /// Sum of listing areas.
        available: u64,
    },
    /// The longest vehicle is longer than every listing side.
    VehicleTooLong {
        /// Longest vehicle length.
        vehicle_length: u32,
        /// Largest listing length.
        max_listing_length: u32,
        /// Largest listing width.
        max_listing_width: u32,
    },
    /// Total vehicle length exceeds lane capacity in both orientations.
    LaneLengthExceeded {
        /// `Σ length * quantity` of the request.
        required: u64,
        /// Lane capacity with lanes running along listing length.
        by_length: u64,
        /// Lane capacity with lanes running along listing width.
        by_width: u64,
    },
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Infeasibility::ZeroUnit => write!(f, "grid unit must be positive"),
            Infeasibility::NoListings => write!(f, "location has no listings"),
            Infeasibility::AreaExceeded {
                required,
                available,
            } => write!(f, "needs area {} but only {} is listed", required, available),
            Infeasibility::VehicleTooLong {
                vehicle_length,
                max_listing_length,
                max_listing_width,
            } => write!(
                f,
                "vehicle of length {} exceeds every listing (longest {}, widest {})",
                vehicle_length, max_listing_length, max_listing_width
            ),
            Infeasibility::LaneLengthExceeded {
                required,
                by_length,
                by_width,
            } => write!(
                f,
                "needs {} of lane length but lanes hold {} lengthwise and {} widthwise",
                required, by_length, by_width
            ),
        }
    }
}

/// Returns false when `location` provably cannot hold `request`.
pub fn can_fit(request: &VehicleRequest, location: &Location, unit: u32) -> bool {
    check(request, location, unit).is_ok()
}

/// Runs the checks in order and reports the first one that fails.
pub fn check(
    request: &VehicleRequest,
    location: &Location,
    unit: u32,
) -> Result<(), Infeasibility> {
    if unit == 0 {
        return Err(Infeasibility::ZeroUnit);
    }

    let (Some(max_listing_length), Some(max_listing_width)) =
        (location.max_listing_length(), location.max_listing_width())
    else {
        return Err(Infeasibility::NoListings);
    };

    let required = request.total_area(unit);
    let available = location.total_area();
    if required > available {
        return Err(Infeasibility::AreaExceeded {
            required,
            available,
        });
    }

    let vehicle_length = request.max_length();
    if vehicle_length > max_listing_length && vehicle_length > max_listing_width {
        return Err(Infeasibility::VehicleTooLong {
            vehicle_length,
            max_listing_length,
            max_listing_width,
        });
    }

    let (by_length, by_width) = lane_capacity(location, unit);
    let required = request.total_length();
    if required > by_length && required > by_width {
        return Err(Infeasibility::LaneLengthExceeded {
            required,
            by_length,
            by_width,
        });
    }

    Ok(())
}

/// Total lane length of a location, for both lane orientations.
///
/// Lanes along the length: `floor(width / unit)` lanes, each `length` long.
/// Lanes along the width: `floor(length / unit)` lanes, each `width` long.
/// A zero unit yields no lanes.
pub fn lane_capacity(location: &Location, unit: u32) -> (u64, u64) {
    location
        .listings()
        .iter()
        .fold((0u64, 0u64), |(by_length, by_width), listing| {
            let lanes_along_length = u64::from(listing.width().checked_div(unit).unwrap_or(0));
            let lanes_along_width = u64::from(listing.length().checked_div(unit).unwrap_or(0));
            (
                by_length + lanes_along_length * u64::from(listing.length()),
                by_width + lanes_along_width * u64::from(listing.width()),
            )
        })
}
