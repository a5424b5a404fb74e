use serde::Deserialize;

use crate::error::ApiError;

pub const INTEGRATION_NOT_FOUND: &str = "GHL integration not found";

/// Query string shared by the GET/DELETE integration routes
#[derive(Debug, Deserialize)]
pub struct BaseIdQuery {
    pub base_id: Option<String>,
}

/// Reject absent or blank workspace identifiers
pub fn require_base_id<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ApiError> {
    match value.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(ApiError::bad_request(format!("{} is required", field))),
    }
}
