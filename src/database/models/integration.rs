use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Auto-sync cadences accepted by the dashboard, in minutes
pub const ALLOWED_SYNC_INTERVALS: [i32; 5] = [1, 5, 15, 30, 60];

/// A workspace's connection to a GHL location.
///
/// The access token stays inside the store layer: it is read for outbound CRM
/// calls but never serialized into API responses.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Integration {
    pub id: Uuid,
    pub base_id: String,
    #[serde(skip_serializing)]
    pub access_token: String,
    pub location_id: String,
    pub auto_sync_enabled: bool,
    pub auto_sync_interval_minutes: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Integration {
    /// New record as the external connect flow would insert it
    pub fn new(
        base_id: impl Into<String>,
        access_token: impl Into<String>,
        location_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            base_id: base_id.into(),
            access_token: access_token.into(),
            location_id: location_id.into(),
            auto_sync_enabled: false,
            auto_sync_interval_minutes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn auto_sync(&self) -> AutoSyncSettings {
        AutoSyncSettings {
            enabled: self.auto_sync_enabled,
            interval_minutes: self.auto_sync_interval_minutes,
        }
    }
}

/// The two fields the settings endpoint is allowed to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoSyncSettings {
    pub enabled: bool,
    pub interval_minutes: Option<i32>,
}

pub const INVALID_SYNC_INTERVAL: &str =
    "Invalid sync interval. Must be one of: 1, 5, 15, 30, 60 minutes";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", INVALID_SYNC_INTERVAL)]
pub struct InvalidSyncInterval(pub i64);

impl AutoSyncSettings {
    /// Validates a requested configuration.
    ///
    /// The interval is only checked when sync is enabled and an interval was
    /// supplied; enabling with no interval passes through unchanged.
    pub fn validated(
        enabled: bool,
        interval_minutes: Option<i64>,
    ) -> Result<Self, InvalidSyncInterval> {
        let interval_minutes = match interval_minutes {
            Some(minutes) if enabled => {
                Some(allowed_interval(minutes).ok_or(InvalidSyncInterval(minutes))?)
            }
            // Disabled: stored as sent. Values outside i32 cannot be persisted.
            Some(minutes) => {
                Some(i32::try_from(minutes).map_err(|_| InvalidSyncInterval(minutes))?)
            }
            None => None,
        };

        Ok(Self {
            enabled,
            interval_minutes,
        })
    }
}

fn allowed_interval(minutes: i64) -> Option<i32> {
    i32::try_from(minutes)
        .ok()
        .filter(|m| ALLOWED_SYNC_INTERVALS.contains(m))
}
