use std::time::Duration;

use anyhow::{Result, bail};

use agentdeck_api::*;

use crate::retry::{RetryConfig, retry_post};

/// Typed HTTP client for the agentdeck backend.
///
/// One method per endpoint. GETs go out plain; the two user-initiated POSTs
/// (`/send` and `/human_response`) run through the bounded-backoff retry
/// helper because their failure is the only one surfaced to the user.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl ApiClient {
    /// Create a new client with the given API base URL and timeout.
    ///
    /// `base_url` is the full API root, e.g. `http://localhost:8009/api`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry: RetryConfig::default(),
        })
    }

    /// Create from an existing `reqwest::Client` (e.g. shared in tests).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry: RetryConfig::default(),
        }
    }

    pub fn set_retry(&mut self, retry: RetryConfig) {
        self.retry = retry;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ── Chat ──────────────────────────────────────────────────────────────

    /// Submit a new chat message; the backend returns the task id to poll.
    pub async fn send(&self, req: &SendRequest) -> Result<SendResponse> {
        let body = serde_json::to_value(req)?;
        let resp = retry_post(&self.client, &self.url("/send"), &body, &self.retry).await?;
        parse_response(resp).await
    }

    /// Answer the pending question of a task.
    pub async fn human_response(&self, req: &HumanResponseRequest) -> Result<OkResponse> {
        let body = serde_json::to_value(req)?;
        let resp =
            retry_post(&self.client, &self.url("/human_response"), &body, &self.retry).await?;
        parse_response(resp).await
    }

    // ── Polling ───────────────────────────────────────────────────────────

    /// Fetch log entries at and after `last_index`.
    pub async fn logs(&self, task_id: &str, last_index: usize) -> Result<LogsResponse> {
        let url = format!("{}?last_index={last_index}", self.url(&format!("/logs/{task_id}")));
        let resp = self.client.get(&url).send().await?;
        parse_response(resp).await
    }

    /// Fetch the task lifecycle snapshot.
    pub async fn status(&self, task_id: &str) -> Result<StatusResponse> {
        let resp = self
            .client
            .get(self.url(&format!("/status/{task_id}")))
            .send()
            .await?;
        parse_response(resp).await
    }

    // ── Workspace ─────────────────────────────────────────────────────────

    /// Fetch the agent's plan/checklist document.
    pub async fn todo(&self) -> Result<TodoResponse> {
        let resp = self.client.get(self.url("/todo")).send().await?;
        parse_response(resp).await
    }

    /// Fetch raw file contents from the agent workspace.
    pub async fn file(&self, path: &str) -> Result<String> {
        let path = path.trim_start_matches('/');
        let resp = self
            .client
            .get(self.url(&format!("/files/{path}")))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("{status}: {body}");
        }
        Ok(resp.text().await?)
    }
}

/// Parse an HTTP response: return the deserialized body on 2xx,
/// or an error containing the status and body text.
async fn parse_response<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        bail!("{status}: {body}");
    }
    Ok(resp.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8009/api/", Duration::from_secs(1))
            .expect("build client");
        assert_eq!(client.base_url(), "http://localhost:8009/api");
        assert_eq!(client.url("/send"), "http://localhost:8009/api/send");
    }

    #[test]
    fn file_paths_do_not_double_slash() {
        let client = ApiClient::new("http://localhost:8009/api", Duration::from_secs(1))
            .expect("build client");
        let path = "/workspace/todo.md".trim_start_matches('/');
        assert_eq!(
            client.url(&format!("/files/{path}")),
            "http://localhost:8009/api/files/workspace/todo.md"
        );
    }
}
