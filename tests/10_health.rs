mod common;

use std::sync::Arc;

use anyhow::Result;
use axum::http::{Method, StatusCode};

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let app = common::TestApp::new();

    let (status, body) = app.get("/health").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["database"], "ok");
    Ok(())
}

#[tokio::test]
async fn health_reports_unavailable_store() -> Result<()> {
    let router = common::router_with_store(Arc::new(common::BrokenStore));

    let (status, body) = common::send(&router, Method::GET, "/health", None).await?;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["status"], "degraded");
    Ok(())
}

#[tokio::test]
async fn root_lists_endpoints() -> Result<()> {
    let app = common::TestApp::new();

    let (status, body) = app.get("/").await?;

    assert_eq!(status, StatusCode::OK);
    assert!(
        body["data"]["endpoints"]["contacts_count"].is_string(),
        "missing endpoint list: {}",
        body
    );
    Ok(())
}
