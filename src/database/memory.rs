use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

use super::manager::DatabaseError;
use super::models::{AutoSyncSettings, Integration, Workspace};
use super::store::IntegrationStore;

/// In-process integration store for tests and local runs without Postgres.
///
/// Mirrors the table constraints: one integration per `base_id`, and a
/// workspace set that integrations reference.
#[derive(Default)]
pub struct MemoryIntegrationStore {
    integrations: RwLock<HashMap<String, Integration>>,
    workspaces: RwLock<HashSet<String>>,
}

impl MemoryIntegrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_workspace(&self, workspace: Workspace) {
        self.workspaces.write().await.insert(workspace.id);
    }

    /// Stores an integration, replacing any existing one for the same base
    pub async fn insert_integration(&self, integration: Integration) {
        self.integrations
            .write()
            .await
            .insert(integration.base_id.clone(), integration);
    }
}

#[async_trait]
impl IntegrationStore for MemoryIntegrationStore {
    async fn find_by_base_id(&self, base_id: &str) -> Result<Option<Integration>, DatabaseError> {
        Ok(self.integrations.read().await.get(base_id).cloned())
    }

    async fn update_auto_sync(
        &self,
        base_id: &str,
        settings: AutoSyncSettings,
    ) -> Result<(), DatabaseError> {
        let mut integrations = self.integrations.write().await;
        let integration = integrations
            .get_mut(base_id)
            .ok_or_else(|| {
                DatabaseError::NotFound(format!("No integration for base '{}'", base_id))
            })?;

        integration.auto_sync_enabled = settings.enabled;
        integration.auto_sync_interval_minutes = settings.interval_minutes;
        integration.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_by_base_id(&self, base_id: &str) -> Result<u64, DatabaseError> {
        let removed = self.integrations.write().await.remove(base_id);
        Ok(removed.map_or(0, |_| 1))
    }

    async fn workspace_exists(&self, base_id: &str) -> Result<bool, DatabaseError> {
        Ok(self.workspaces.read().await.contains(base_id))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
