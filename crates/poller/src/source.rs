use anyhow::Result;

use agentdeck_api::{LogsResponse, StatusResponse};
use agentdeck_api_client::ApiClient;

/// Read side of the backend, as seen by the pollers.
///
/// `ApiClient` is the production implementation; tests script in-memory
/// fakes against the same seam.
pub trait TaskSource: Send + Sync + 'static {
    /// Log entries at and after `cursor`.
    fn fetch_logs(
        &self,
        task_id: &str,
        cursor: usize,
    ) -> impl Future<Output = Result<LogsResponse>> + Send;

    /// Current lifecycle snapshot.
    fn fetch_status(&self, task_id: &str) -> impl Future<Output = Result<StatusResponse>> + Send;
}

impl TaskSource for ApiClient {
    async fn fetch_logs(&self, task_id: &str, cursor: usize) -> Result<LogsResponse> {
        self.logs(task_id, cursor).await
    }

    async fn fetch_status(&self, task_id: &str) -> Result<StatusResponse> {
        self.status(task_id).await
    }
}
