//! GitLab platform service implementation

use crate::error::{Error, Result};
use crate::platform::{MergeRequestApi, Operation};
use crate::request::SourceConfig;
use crate::types::{AcceptOptions, CommitStatus, MergeRequest};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::debug;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// GitLab service using reqwest
pub struct GitLabService {
    client: Client,
    token: String,
    base_url: String,
}

impl GitLabService {
    /// Create a new GitLab service
    ///
    /// `base_url` is the API root, e.g. `https://gitlab.example.com/api/v4`.
    pub fn new(base_url: String, token: String, insecure: bool) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .danger_accept_invalid_certs(insecure)
            .build()?;

        Ok(Self {
            client,
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a service from the request's `source` block
    pub fn from_source(source: &SourceConfig) -> Result<Self> {
        Self::new(
            source.base_url()?,
            source.private_token.clone(),
            source.insecure,
        )
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn mr_url(&self, project_id: u64, mr_iid: u64) -> String {
        self.api_url(&format!("/projects/{project_id}/merge_requests/{mr_iid}"))
    }

    /// Send a request and require exactly `expected` back
    async fn send_expecting(
        &self,
        operation: Operation,
        request: RequestBuilder,
        expected: StatusCode,
    ) -> Result<Response> {
        let response = request
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .await
            .map_err(|source| Error::Transport { operation, source })?;

        let status = response.status();
        if status != expected {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::UnexpectedStatus {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl MergeRequestApi for GitLabService {
    async fn set_commit_status(
        &self,
        project_id: u64,
        sha: &str,
        status: &CommitStatus,
    ) -> Result<()> {
        debug!(project_id, sha, state = %status.state, "setting commit status");
        let url = self.api_url(&format!("/projects/{project_id}/statuses/{sha}"));

        self.send_expecting(
            Operation::SetCommitStatus,
            self.client.post(&url).json(status),
            StatusCode::CREATED,
        )
        .await?;

        debug!(project_id, sha, "set commit status");
        Ok(())
    }

    async fn create_note(&self, project_id: u64, mr_iid: u64, body: &str) -> Result<()> {
        debug!(project_id, mr_iid, "creating MR note");
        let url = format!("{}/notes", self.mr_url(project_id, mr_iid));

        self.send_expecting(
            Operation::CreateNote,
            self.client
                .post(&url)
                .json(&serde_json::json!({ "body": body })),
            StatusCode::CREATED,
        )
        .await?;

        debug!(project_id, mr_iid, "created MR note");
        Ok(())
    }

    async fn get_merge_request(&self, project_id: u64, mr_iid: u64) -> Result<MergeRequest> {
        debug!(project_id, mr_iid, "fetching MR");
        let url = self.mr_url(project_id, mr_iid);

        let mr: MergeRequest = self
            .send_expecting(
                Operation::GetMergeRequest,
                self.client.get(&url),
                StatusCode::OK,
            )
            .await?
            .json()
            .await
            .map_err(|source| Error::Transport {
                operation: Operation::GetMergeRequest,
                source,
            })?;

        debug!(project_id, mr_iid, labels = ?mr.labels, "fetched MR");
        Ok(mr)
    }

    async fn update_labels(&self, project_id: u64, mr_iid: u64, labels: &[String]) -> Result<()> {
        debug!(project_id, mr_iid, ?labels, "updating MR labels");
        let url = self.mr_url(project_id, mr_iid);

        // GitLab takes the label set as a comma-separated string; an empty
        // string clears it.
        self.send_expecting(
            Operation::UpdateMergeRequest,
            self.client
                .put(&url)
                .json(&serde_json::json!({ "labels": labels.join(",") })),
            StatusCode::OK,
        )
        .await?;

        debug!(project_id, mr_iid, "updated MR labels");
        Ok(())
    }

    async fn accept_merge_request(
        &self,
        project_id: u64,
        mr_iid: u64,
        options: AcceptOptions,
    ) -> Result<()> {
        debug!(project_id, mr_iid, ?options, "accepting MR");
        let url = format!("{}/merge", self.mr_url(project_id, mr_iid));

        self.send_expecting(
            Operation::AcceptMergeRequest,
            self.client.put(&url).json(&options),
            StatusCode::OK,
        )
        .await?;

        debug!(project_id, mr_iid, "accepted MR");
        Ok(())
    }
}
