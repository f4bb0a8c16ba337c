//! HTTP client for the backup manager REST API.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::models::{
    Archive, ArchiveInfo, AssignScriptRequest, MaintenanceStatus, Repository, RepositoryInfo,
    RestoreJob, RestoreRequest, Script, ScriptAssignment, Settings,
};
use crate::config::ApiConfig;
use crate::error::{BorgdeckError, Result};

/// Default request timeout when none is configured.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Typed client for the backend REST API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with an explicit request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BorgdeckError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from configuration.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::with_timeout(config.base_url.clone(), config.timeout())
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(BorgdeckError::Api {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!("GET {}", path);
        let response = self.client.get(self.url(path)).send().await?;
        Self::decode(path, response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        tracing::debug!("POST {}", path);
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::decode(path, response).await
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        tracing::debug!("PUT {}", path);
        let response = self.client.put(self.url(path)).json(body).send().await?;
        Self::decode(path, response).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        tracing::debug!("DELETE {}", path);
        let response = self.client.delete(self.url(path)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BorgdeckError::Api {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    // === Settings ===

    /// Read the system-wide settings document.
    pub async fn settings(&self) -> Result<Settings> {
        self.get_json("/api/settings").await
    }

    /// Replace the system-wide settings document, returning the stored copy.
    pub async fn update_settings(&self, settings: &Settings) -> Result<Settings> {
        self.put_json("/api/settings", settings).await
    }

    // === Repositories ===

    /// List all repositories.
    pub async fn repositories(&self) -> Result<Vec<Repository>> {
        self.get_json("/api/repositories").await
    }

    /// Fetch one repository; a backend 404 maps to
    /// [`BorgdeckError::RepositoryNotFound`].
    pub async fn repository(&self, id: i64) -> Result<Repository> {
        let path = format!("/api/repositories/{id}");
        tracing::debug!("GET {}", path);
        let response = self.client.get(self.url(&path)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(BorgdeckError::RepositoryNotFound(id.to_string()));
        }
        Self::decode(&path, response).await
    }

    /// Fetch repository-level stats.
    pub async fn repository_info(&self, id: i64) -> Result<RepositoryInfo> {
        self.get_json(&format!("/api/repositories/{id}/info")).await
    }

    /// List the archives in a repository.
    pub async fn archives(&self, repository_id: i64) -> Result<Vec<Archive>> {
        self.get_json(&format!("/api/repositories/{repository_id}/archives"))
            .await
    }

    /// Fetch detailed stats for one archive.
    pub async fn archive_info(&self, repository_id: i64, name: &str) -> Result<ArchiveInfo> {
        self.get_json(&format!(
            "/api/repositories/{repository_id}/archives/{name}/info"
        ))
        .await
    }

    /// Snapshot of the running maintenance jobs for a repository.
    pub async fn running_jobs(&self, repository_id: i64) -> Result<MaintenanceStatus> {
        self.get_json(&format!("/api/repositories/{repository_id}/jobs/running"))
            .await
    }

    // === Restores ===

    /// List restore jobs.
    pub async fn restores(&self) -> Result<Vec<RestoreJob>> {
        self.get_json("/api/restores").await
    }

    /// Create a restore job.
    pub async fn create_restore(&self, request: &RestoreRequest) -> Result<RestoreJob> {
        self.post_json("/api/restores", request).await
    }

    // === Scripts ===

    /// List all scripts known to the backend.
    pub async fn scripts(&self) -> Result<Vec<Script>> {
        self.get_json("/api/scripts").await
    }

    /// List the scripts attached to a repository.
    pub async fn repository_scripts(&self, repository_id: i64) -> Result<Vec<ScriptAssignment>> {
        self.get_json(&format!("/api/repositories/{repository_id}/scripts"))
            .await
    }

    /// Attach a script to a repository.
    pub async fn assign_script(
        &self,
        repository_id: i64,
        request: &AssignScriptRequest,
    ) -> Result<ScriptAssignment> {
        self.post_json(&format!("/api/repositories/{repository_id}/scripts"), request)
            .await
    }

    /// Detach a script assignment from a repository.
    pub async fn unassign_script(&self, repository_id: i64, assignment_id: i64) -> Result<()> {
        self.delete(&format!(
            "/api/repositories/{repository_id}/scripts/{assignment_id}"
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = ApiClient::new("http://127.0.0.1:8200/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8200");
        assert_eq!(
            client.url("/api/repositories"),
            "http://127.0.0.1:8200/api/repositories"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Port 1 is never listening; the connect error must surface as
        // Network, not a panic or an Api variant.
        let client =
            ApiClient::with_timeout("http://127.0.0.1:1", Duration::from_millis(500)).unwrap();
        let err = client.repositories().await.unwrap_err();
        assert!(matches!(err, BorgdeckError::Network(_)));
    }
}
