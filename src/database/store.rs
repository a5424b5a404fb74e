use async_trait::async_trait;

use super::manager::DatabaseError;
use super::models::{AutoSyncSettings, Integration};

/// Persistence seam for CRM integrations, one record per workspace.
///
/// Every operation touches a single record; concurrent writers to the same
/// `base_id` are last-writer-wins.
#[async_trait]
pub trait IntegrationStore: Send + Sync {
    /// Look up the integration for a workspace
    async fn find_by_base_id(&self, base_id: &str) -> Result<Option<Integration>, DatabaseError>;

    /// Write the auto-sync fields and refresh `updated_at`.
    /// Returns `DatabaseError::NotFound` when no integration matches.
    async fn update_auto_sync(
        &self,
        base_id: &str,
        settings: AutoSyncSettings,
    ) -> Result<(), DatabaseError>;

    /// Remove the integration for a workspace, returning the number of rows removed
    async fn delete_by_base_id(&self, base_id: &str) -> Result<u64, DatabaseError>;

    async fn workspace_exists(&self, base_id: &str) -> Result<bool, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
