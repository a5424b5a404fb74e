use axum::extract::{rejection::JsonRejection, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use tracing::{info, warn};

use crate::database::models::{AutoSyncSettings, INVALID_SYNC_INTERVAL};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Message};
use crate::AppState;

use super::utils::{require_base_id, BaseIdQuery, INTEGRATION_NOT_FOUND};

#[derive(Debug, Deserialize)]
pub struct AutoSyncSettingsRequest {
    #[serde(rename = "baseId", default)]
    pub base_id: Option<String>,
    #[serde(default)]
    pub auto_sync_enabled: bool,
    /// Any JSON number; whole floats such as `15.0` count as minutes
    #[serde(default)]
    pub auto_sync_interval_minutes: Option<Number>,
}

#[derive(Debug, Serialize)]
pub struct AutoSyncSettingsView {
    pub auto_sync_enabled: bool,
    pub auto_sync_interval_minutes: Option<i32>,
    pub location_id: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SettingsPayload {
    pub settings: AutoSyncSettingsView,
}

/// PUT /autosync-settings - persist the auto-sync cadence for a workspace's integration
pub async fn put(
    State(state): State<AppState>,
    payload: Result<Json<AutoSyncSettingsRequest>, JsonRejection>,
) -> ApiResult<Message> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let base_id = require_base_id(request.base_id.as_deref(), "baseId")?;

    let interval_minutes = request
        .auto_sync_interval_minutes
        .as_ref()
        .map(whole_minutes)
        .transpose()?;
    let settings = AutoSyncSettings::validated(request.auto_sync_enabled, interval_minutes)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    if settings.enabled && settings.interval_minutes.is_none() {
        warn!(base_id, "Auto-sync enabled without an interval");
    }

    state
        .store
        .find_by_base_id(base_id)
        .await?
        .ok_or_else(|| ApiError::not_found(INTEGRATION_NOT_FOUND))?;

    state.store.update_auto_sync(base_id, settings).await?;

    info!(
        base_id,
        enabled = settings.enabled,
        interval_minutes = ?settings.interval_minutes,
        "Updated auto-sync settings"
    );
    Ok(ApiResponse::message("Auto-sync settings updated successfully"))
}

/// GET /autosync-settings - current auto-sync configuration, without credentials
pub async fn get(
    State(state): State<AppState>,
    Query(query): Query<BaseIdQuery>,
) -> ApiResult<SettingsPayload> {
    let base_id = require_base_id(query.base_id.as_deref(), "base_id")?;

    let integration = state
        .store
        .find_by_base_id(base_id)
        .await?
        .ok_or_else(|| ApiError::not_found(INTEGRATION_NOT_FOUND))?;

    Ok(ApiResponse::success(SettingsPayload {
        settings: AutoSyncSettingsView {
            auto_sync_enabled: integration.auto_sync_enabled,
            auto_sync_interval_minutes: integration.auto_sync_interval_minutes,
            location_id: integration.location_id,
            updated_at: integration.updated_at,
        },
    }))
}

fn whole_minutes(value: &Number) -> Result<i64, ApiError> {
    value
        .as_i64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                .map(|f| f as i64)
        })
        .ok_or_else(|| ApiError::bad_request(INVALID_SYNC_INTERVAL))
}
