//! Outbound calls to the GHL (LeadConnector) REST API.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::CrmConfig;

#[derive(Debug, Error)]
pub enum CrmError {
    /// The CRM answered with a non-success status
    #[error("GHL API error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// The request never produced a usable response
    #[error("GHL request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid GHL client configuration: {0}")]
    InvalidConfig(String),
}

/// CRM operations the dashboard needs, on behalf of one integration
#[async_trait]
pub trait CrmClient: Send + Sync {
    /// Total number of contacts in a location
    async fn count_contacts(&self, access_token: &str, location_id: &str) -> Result<u64, CrmError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchContactsRequest<'a> {
    location_id: &'a str,
    page: u32,
    page_limit: u32,
}

#[derive(Debug, Deserialize)]
struct SearchContactsResponse {
    /// Size of the whole result set, independent of the page size
    #[serde(default)]
    total: Option<u64>,
}

/// reqwest-backed client. Build once at startup and share.
#[derive(Clone)]
pub struct GhlClient {
    http: reqwest::Client,
    search_url: url::Url,
}

impl GhlClient {
    pub fn new(config: &CrmConfig) -> Result<Self, CrmError> {
        let base = url::Url::parse(&format!("{}/", config.base_url.trim_end_matches('/')))
            .map_err(|e| CrmError::InvalidConfig(e.to_string()))?;
        let search_url = base
            .join("contacts/search")
            .map_err(|e| CrmError::InvalidConfig(e.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            "Version",
            HeaderValue::from_str(&config.api_version)
                .map_err(|e| CrmError::InvalidConfig(e.to_string()))?,
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            search_url,
        })
    }

    pub fn search_url(&self) -> &url::Url {
        &self.search_url
    }
}

#[async_trait]
impl CrmClient for GhlClient {
    async fn count_contacts(&self, access_token: &str, location_id: &str) -> Result<u64, CrmError> {
        // One page of one record: the response metadata carries the full total.
        let request = SearchContactsRequest {
            location_id,
            page: 1,
            page_limit: 1,
        };

        let response = self
            .http
            .post(self.search_url.clone())
            .bearer_auth(access_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), location_id, "GHL contact search failed");
            return Err(CrmError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let payload: SearchContactsResponse = response.json().await?;
        let total = payload.total.unwrap_or(0);
        debug!(location_id, total, "GHL contact search succeeded");
        Ok(total)
    }
}
