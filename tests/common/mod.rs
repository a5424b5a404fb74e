#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use ghl_dashboard_api::crm::{CrmClient, CrmError};
use ghl_dashboard_api::database::models::{AutoSyncSettings, Integration, Workspace};
use ghl_dashboard_api::database::{DatabaseError, IntegrationStore, MemoryIntegrationStore};
use ghl_dashboard_api::AppState;

/// What the scripted CRM answers with
#[derive(Debug, Clone)]
pub enum CrmReply {
    Total(u64),
    Upstream(u16, String),
}

/// CrmClient double that records every call
pub struct ScriptedCrm {
    reply: Mutex<CrmReply>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedCrm {
    pub fn new(reply: CrmReply) -> Self {
        Self {
            reply: Mutex::new(reply),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_reply(&self, reply: CrmReply) {
        *self.reply.lock().unwrap() = reply;
    }

    /// (access_token, location_id) pairs seen so far
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CrmClient for ScriptedCrm {
    async fn count_contacts(&self, access_token: &str, location_id: &str) -> Result<u64, CrmError> {
        self.calls
            .lock()
            .unwrap()
            .push((access_token.to_string(), location_id.to_string()));

        match self.reply.lock().unwrap().clone() {
            CrmReply::Total(total) => Ok(total),
            CrmReply::Upstream(status, body) => Err(CrmError::Upstream { status, body }),
        }
    }
}

/// Store whose every call fails, for the 500 paths
pub struct BrokenStore;

#[async_trait]
impl IntegrationStore for BrokenStore {
    async fn find_by_base_id(&self, _base_id: &str) -> Result<Option<Integration>, DatabaseError> {
        Err(DatabaseError::QueryError("connection reset by peer".into()))
    }

    async fn update_auto_sync(
        &self,
        _base_id: &str,
        _settings: AutoSyncSettings,
    ) -> Result<(), DatabaseError> {
        Err(DatabaseError::QueryError("connection reset by peer".into()))
    }

    async fn delete_by_base_id(&self, _base_id: &str) -> Result<u64, DatabaseError> {
        Err(DatabaseError::QueryError("permission denied for table ghl_integrations".into()))
    }

    async fn workspace_exists(&self, _base_id: &str) -> Result<bool, DatabaseError> {
        Ok(true)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Err(DatabaseError::ConnectionError("pool timed out".into()))
    }
}

pub struct TestApp {
    pub store: Arc<MemoryIntegrationStore>,
    pub crm: Arc<ScriptedCrm>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryIntegrationStore::new());
        let crm = Arc::new(ScriptedCrm::new(CrmReply::Total(0)));
        let router = ghl_dashboard_api::router(AppState::new(store.clone(), crm.clone()));
        Self { store, crm, router }
    }

    /// Base with a connected integration
    pub async fn with_integration(base_id: &str) -> Self {
        let app = Self::new();
        app.store.insert_workspace(Workspace::new(base_id, "Test base")).await;
        app.store
            .insert_integration(Integration::new(
                base_id,
                format!("token-{}", base_id),
                format!("loc-{}", base_id),
            ))
            .await;
        app
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        send(&self.router, method, uri, body).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn get(&self, uri: &str) -> Result<(StatusCode, Value)> {
        self.request(Method::GET, uri, None).await
    }

    pub async fn delete(&self, uri: &str) -> Result<(StatusCode, Value)> {
        self.request(Method::DELETE, uri, None).await
    }
}

pub fn router_with_store(store: Arc<dyn IntegrationStore>) -> Router {
    let crm = Arc::new(ScriptedCrm::new(CrmReply::Total(0)));
    ghl_dashboard_api::router(AppState::new(store, crm))
}

pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = router.clone().oneshot(request).await.context("router call failed")?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .with_context(|| format!("non-JSON body: {}", String::from_utf8_lossy(&bytes)))?
    };
    Ok((status, body))
}

pub async fn send_raw(
    router: &Router,
    method: Method,
    uri: &str,
    raw_body: &str,
) -> Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw_body.to_string()))?;

    let response = router.clone().oneshot(request).await.context("router call failed")?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes).unwrap_or(Value::Null)))
}
