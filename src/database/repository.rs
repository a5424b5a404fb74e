use async_trait::async_trait;
use tracing::debug;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{AutoSyncSettings, Integration};
use super::store::IntegrationStore;

const INTEGRATIONS_TABLE: &str = "ghl_integrations";
const WORKSPACES_TABLE: &str = "bases";

/// Postgres-backed integration store on the shared pool
#[derive(Clone)]
pub struct PgIntegrationStore {
    db: DatabaseManager,
}

impl PgIntegrationStore {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IntegrationStore for PgIntegrationStore {
    async fn find_by_base_id(&self, base_id: &str) -> Result<Option<Integration>, DatabaseError> {
        let sql = format!(
            "SELECT id, base_id, access_token, location_id, auto_sync_enabled, \
             auto_sync_interval_minutes, created_at, updated_at \
             FROM {} WHERE base_id = $1",
            INTEGRATIONS_TABLE
        );

        let integration = sqlx::query_as::<_, Integration>(&sql)
            .bind(base_id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(integration)
    }

    async fn update_auto_sync(
        &self,
        base_id: &str,
        settings: AutoSyncSettings,
    ) -> Result<(), DatabaseError> {
        let sql = format!(
            "UPDATE {} \
             SET auto_sync_enabled = $1, auto_sync_interval_minutes = $2, updated_at = NOW() \
             WHERE base_id = $3",
            INTEGRATIONS_TABLE
        );

        let result = sqlx::query(&sql)
            .bind(settings.enabled)
            .bind(settings.interval_minutes)
            .bind(base_id)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("No integration for base '{}'", base_id)));
        }

        debug!(base_id, "Updated auto-sync settings");
        Ok(())
    }

    async fn delete_by_base_id(&self, base_id: &str) -> Result<u64, DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE base_id = $1", INTEGRATIONS_TABLE);

        let result = sqlx::query(&sql).bind(base_id).execute(self.db.pool()).await?;

        debug!(base_id, rows = result.rows_affected(), "Deleted integration rows");
        Ok(result.rows_affected())
    }

    async fn workspace_exists(&self, base_id: &str) -> Result<bool, DatabaseError> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE id = $1", WORKSPACES_TABLE);

        let count: (i64,) = sqlx::query_as(&sql).bind(base_id).fetch_one(self.db.pool()).await?;

        Ok(count.0 > 0)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.db.health_check().await
    }
}
