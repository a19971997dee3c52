//! # U-Stow CLI
//!
//! Wire types and command implementations for the `stow` binary.
//!
//! ```rust
//! use u_stow_cli::api::parse_request;
//!
//! let request = parse_request(r#"[{"length": 20, "quantity": 2}]"#, 5).unwrap();
//! assert_eq!(request.vehicle_count(), 2);
//!
//! let invalid = parse_request("[]", 5).unwrap_err();
//! assert_eq!(
//!     invalid.messages(),
//!     vec!["Value error, At least one vehicle entry is required"]
//! );
//! ```

pub mod api;
pub mod commands;

pub use api::{
    parse_request, SearchResultResponse, ValidationErrorResponse, EXIT_FAILURE,
    EXIT_INVALID_REQUEST, EXIT_OK,
};
pub use commands::{generate, inspect, search, CatalogSummary, CommandOutput};
