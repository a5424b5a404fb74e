use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use ghl_dashboard_api::config::CrmConfig;
use ghl_dashboard_api::crm::{CrmClient, CrmError, GhlClient};

#[derive(Debug, Clone)]
struct SeenRequest {
    authorization: Option<String>,
    version: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    reply: Value,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

async fn search(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
    stub.seen.lock().unwrap().push(SeenRequest {
        authorization: header("authorization"),
        version: header("version"),
        body,
    });
    (stub.status, Json(stub.reply.clone()))
}

/// Serves a fake GHL API on a free local port
async fn spawn_stub(
    status: StatusCode,
    reply: Value,
) -> Result<(String, Arc<Mutex<Vec<SeenRequest>>>)> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let seen = Arc::new(Mutex::new(Vec::new()));
    let stub = Stub {
        status,
        reply,
        seen: seen.clone(),
    };

    let app = Router::new().route("/contacts/search", post(search)).with_state(stub);
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok((format!("http://127.0.0.1:{}", port), seen))
}

fn client_for(base_url: &str) -> Result<GhlClient> {
    let config = CrmConfig {
        base_url: base_url.to_string(),
        ..CrmConfig::default()
    };
    Ok(GhlClient::new(&config)?)
}

#[tokio::test]
async fn requests_single_page_and_reads_total() -> Result<()> {
    let (base_url, seen) =
        spawn_stub(StatusCode::OK, json!({ "contacts": [{ "id": "c1" }], "total": 42 })).await?;
    let client = client_for(&base_url)?;

    let total = client.count_contacts("tok-123", "loc-9").await?;

    assert_eq!(total, 42);
    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer tok-123"));
    assert_eq!(seen[0].version.as_deref(), Some("2021-07-28"));
    assert_eq!(seen[0].body, json!({ "locationId": "loc-9", "page": 1, "pageLimit": 1 }));
    Ok(())
}

#[tokio::test]
async fn missing_total_defaults_to_zero() -> Result<()> {
    let (base_url, _) = spawn_stub(StatusCode::OK, json!({ "contacts": [] })).await?;
    let client = client_for(&base_url)?;

    assert_eq!(client.count_contacts("tok", "loc").await?, 0);
    Ok(())
}

#[tokio::test]
async fn non_success_status_is_upstream_error() -> Result<()> {
    let (base_url, seen) =
        spawn_stub(StatusCode::UNAUTHORIZED, json!({ "message": "Invalid JWT" })).await?;
    let client = client_for(&base_url)?;

    let err = client.count_contacts("expired", "loc").await.unwrap_err();

    match err {
        CrmError::Upstream { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid JWT"));
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
    // No retry
    assert_eq!(seen.lock().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn unreachable_host_is_transport_error() -> Result<()> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let client = client_for(&format!("http://127.0.0.1:{}", port))?;

    let err = client.count_contacts("tok", "loc").await.unwrap_err();

    assert!(matches!(err, CrmError::Transport(_)), "got {:?}", err);
    Ok(())
}

#[test]
fn search_url_respects_base_path() -> Result<()> {
    let client = client_for("https://crm.example.com/v2/")?;
    assert_eq!(client.search_url().as_str(), "https://crm.example.com/v2/contacts/search");
    Ok(())
}
