//! JSON wire types for the `stow` commands.
//!
//! Requests are JSON arrays of `{"length": int, "quantity": int}`. Validation
//! failures are reported as `{"detail": [{"loc": [...], "msg": "..."}]}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use u_stow_core::{Error, SearchResult, VehicleEntry, VehicleRequest};
use u_stow_grid::{Rejection, SearchReport};

/// Exit code for a successful command.
pub const EXIT_OK: i32 = 0;
/// Exit code for a runtime failure.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for a request that failed validation.
pub const EXIT_INVALID_REQUEST: i32 = 2;

/// One validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Path to the offending value, starting at `"body"`.
    pub loc: Vec<Value>,
    /// Human-readable message.
    pub msg: String,
}

impl ErrorDetail {
    fn body(msg: impl Into<String>) -> Self {
        Self {
            loc: vec![Value::from("body")],
            msg: msg.into(),
        }
    }

    fn field(index: usize, field: &str, msg: impl Into<String>) -> Self {
        Self {
            loc: vec![Value::from("body"), Value::from(index), Value::from(field)],
            msg: msg.into(),
        }
    }
}

/// Body returned when a request fails validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub detail: Vec<ErrorDetail>,
}

impl ValidationErrorResponse {
    fn single(detail: ErrorDetail) -> Self {
        Self {
            detail: vec![detail],
        }
    }

    /// Returns the messages in order.
    pub fn messages(&self) -> Vec<&str> {
        self.detail.iter().map(|d| d.msg.as_str()).collect()
    }
}

impl From<Error> for ValidationErrorResponse {
    fn from(e: Error) -> Self {
        match e {
            Error::InvalidRequest(msg) => {
                Self::single(ErrorDetail::body(format!("Value error, {}", msg)))
            }
            other => Self::single(ErrorDetail::body(other.to_string())),
        }
    }
}

/// One ranked location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultResponse {
    pub location_id: String,
    pub listing_ids: Vec<String>,
    pub total_price_in_cents: u64,
}

impl From<SearchResult> for SearchResultResponse {
    fn from(r: SearchResult) -> Self {
        Self {
            location_id: r.location_id,
            listing_ids: r.listing_ids,
            total_price_in_cents: r.total_price_in_cents,
        }
    }
}

/// A location left out of the results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionResponse {
    pub location_id: String,
    pub reason: String,
}

impl From<&Rejection> for RejectionResponse {
    fn from(r: &Rejection) -> Self {
        Self {
            location_id: r.location_id.clone(),
            reason: r.reason.to_string(),
        }
    }
}

/// Results plus exclusions, printed by `stow search --report`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReportResponse {
    pub results: Vec<SearchResultResponse>,
    pub rejections: Vec<RejectionResponse>,
}

impl From<SearchReport> for SearchReportResponse {
    fn from(report: SearchReport) -> Self {
        Self {
            rejections: report.rejections.iter().map(RejectionResponse::from).collect(),
            results: report.results.into_iter().map(Into::into).collect(),
        }
    }
}

/// Parses and validates a request body.
///
/// Field errors are collected for every entry before the request-level rules
/// (non-empty, vehicle cap) run.
pub fn parse_request(
    body: &str,
    max_vehicles: u32,
) -> Result<VehicleRequest, ValidationErrorResponse> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        ValidationErrorResponse::single(ErrorDetail::body(format!("JSON decode error: {}", e)))
    })?;

    let Value::Array(items) = value else {
        return Err(ValidationErrorResponse::single(ErrorDetail::body(
            "Input should be a valid list",
        )));
    };

    let mut entries = Vec::with_capacity(items.len());
    let mut detail = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            detail.push(ErrorDetail {
                loc: vec![Value::from("body"), Value::from(index)],
                msg: "Input should be a valid dictionary".into(),
            });
            continue;
        };

        let length = positive_field(object, index, "length");
        let quantity = positive_field(object, index, "quantity");
        match (length, quantity) {
            (Ok(length), Ok(quantity)) => entries.push(VehicleEntry::new(length, quantity)),
            (length, quantity) => detail.extend(length.err().into_iter().chain(quantity.err())),
        }
    }

    if !detail.is_empty() {
        return Err(ValidationErrorResponse { detail });
    }

    VehicleRequest::with_max_vehicles(entries, max_vehicles)
        .map_err(ValidationErrorResponse::from)
}

fn positive_field(
    object: &Map<String, Value>,
    index: usize,
    field: &str,
) -> Result<u32, ErrorDetail> {
    let value = object
        .get(field)
        .ok_or_else(|| ErrorDetail::field(index, field, "Field required"))?;
    let n = match (value.as_i64(), value.as_f64()) {
        (Some(n), _) => n,
        // Float-to-int casts saturate, so huge values still fail the range check below.
        (None, Some(f)) if f.fract() == 0.0 => f as i64,
        (None, Some(_)) => {
            return Err(ErrorDetail::field(
                index,
                field,
                "Input should be a valid integer, got a number with a fractional part",
            ))
        }
        (None, None) => {
            return Err(ErrorDetail::field(
                index,
                field,
                "Input should be a valid integer",
            ))
        }
    };
    if n <= 0 {
        return Err(ErrorDetail::field(index, field, "Input should be greater than 0"));
    }
    u32::try_from(n).map_err(|_| {
        ErrorDetail::field(
            index,
            field,
            format!("Input should be less than or equal to {}", u32::MAX),
        )
    })
}
