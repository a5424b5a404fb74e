use axum::extract::{Query, State};
use serde::Serialize;
use tracing::{error, info};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

use super::utils::{require_base_id, BaseIdQuery, INTEGRATION_NOT_FOUND};

#[derive(Debug, Serialize)]
pub struct ContactsCount {
    pub total: u64,
}

/// GET /contacts-count - total contacts in the connected GHL location
pub async fn get(
    State(state): State<AppState>,
    Query(query): Query<BaseIdQuery>,
) -> ApiResult<ContactsCount> {
    let base_id = require_base_id(query.base_id.as_deref(), "base_id")?;

    let integration = state
        .store
        .find_by_base_id(base_id)
        .await?
        .ok_or_else(|| ApiError::not_found(INTEGRATION_NOT_FOUND))?;

    let total = state
        .crm
        .count_contacts(&integration.access_token, &integration.location_id)
        .await
        .map_err(|e| {
            error!(base_id, error = %e, "Contacts count failed");
            ApiError::internal_server_error(format!("Failed to fetch contacts count: {}", e))
        })?;

    info!(base_id, total, "Fetched contacts count");
    Ok(ApiResponse::success(ContactsCount { total }))
}
