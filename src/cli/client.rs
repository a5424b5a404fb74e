use anyhow::Context;
use reqwest::StatusCode;
use serde_json::{json, Value};

/// Response from the dashboard API, kept even for error statuses
#[derive(Debug)]
pub struct ApiReply {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiReply {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn error_message(&self) -> String {
        self.body
            .get("error")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("request failed with status {}", self.status))
    }
}

/// Thin HTTP client for a running dashboard API
pub struct ApiClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl ApiClient {
    pub fn new(server: &str) -> anyhow::Result<Self> {
        let base_url = url::Url::parse(&format!("{}/", server.trim_end_matches('/')))
            .with_context(|| format!("invalid server URL: {}", server))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn endpoint(&self, path: &str) -> anyhow::Result<url::Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("invalid endpoint path: {}", path))
    }

    pub async fn update_settings(
        &self,
        base_id: &str,
        enabled: bool,
        interval: Option<i64>,
    ) -> anyhow::Result<ApiReply> {
        let request = self.http.put(self.endpoint("autosync-settings")?).json(&json!({
            "baseId": base_id,
            "auto_sync_enabled": enabled,
            "auto_sync_interval_minutes": interval,
        }));
        Self::send(request).await
    }

    pub async fn get_settings(&self, base_id: &str) -> anyhow::Result<ApiReply> {
        let request = self
            .http
            .get(self.endpoint("autosync-settings")?)
            .query(&[("base_id", base_id)]);
        Self::send(request).await
    }

    pub async fn contacts_count(&self, base_id: &str) -> anyhow::Result<ApiReply> {
        let request = self
            .http
            .get(self.endpoint("contacts-count")?)
            .query(&[("base_id", base_id)]);
        Self::send(request).await
    }

    pub async fn disconnect(&self, base_id: &str) -> anyhow::Result<ApiReply> {
        let request = self
            .http
            .delete(self.endpoint("disconnect")?)
            .query(&[("base_id", base_id)]);
        Self::send(request).await
    }

    pub async fn health(&self) -> anyhow::Result<ApiReply> {
        Self::send(self.http.get(self.endpoint("health")?)).await
    }

    async fn send(request: reqwest::RequestBuilder) -> anyhow::Result<ApiReply> {
        let response = request.send().await.context("failed to reach dashboard API")?;
        let status = response.status();
        let text = response.text().await.context("failed to read response body")?;
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Ok(ApiReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_keep_server_path_prefix() {
        let client = ApiClient::new("http://localhost:3000/api/ghl").unwrap();
        assert_eq!(
            client.endpoint("contacts-count").unwrap().as_str(),
            "http://localhost:3000/api/ghl/contacts-count"
        );

        let client = ApiClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.endpoint("health").unwrap().as_str(), "http://localhost:3000/health");
    }

    #[test]
    fn error_message_falls_back_to_status() {
        let reply = ApiReply {
            status: StatusCode::BAD_GATEWAY,
            body: Value::String("upstream".into()),
        };
        assert!(reply.error_message().contains("502"));

        let reply = ApiReply {
            status: StatusCode::NOT_FOUND,
            body: json!({ "success": false, "error": "Base not found" }),
        };
        assert_eq!(reply.error_message(), "Base not found");
    }
}
