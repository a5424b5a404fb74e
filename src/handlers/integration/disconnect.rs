use axum::extract::{Query, State};
use tracing::info;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Message};
use crate::AppState;

use super::utils::{require_base_id, BaseIdQuery};

/// DELETE /disconnect - drop a workspace's GHL integration.
///
/// The workspace, not the integration, must exist: deleting when no
/// integration is present still succeeds, so repeated calls return 200.
pub async fn delete(
    State(state): State<AppState>,
    Query(query): Query<BaseIdQuery>,
) -> ApiResult<Message> {
    let base_id = require_base_id(query.base_id.as_deref(), "base_id")?;

    if !state.store.workspace_exists(base_id).await? {
        return Err(ApiError::not_found("Base not found"));
    }

    let removed = state.store.delete_by_base_id(base_id).await?;

    info!(base_id, removed, "Disconnected GHL integration");
    Ok(ApiResponse::message("GHL integration disconnected successfully"))
}
