//! Mock platform service for testing

#![allow(dead_code)]

use async_trait::async_trait;
use gitlab_mr_resource::error::{Error, Result};
use gitlab_mr_resource::platform::{MergeRequestApi, Operation};
use gitlab_mr_resource::types::{AcceptOptions, CommitStatus, MergeRequest};
use std::collections::HashMap;
use std::sync::Mutex;

/// A recorded call against the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    /// `set_commit_status`
    SetCommitStatus {
        project_id: u64,
        sha: String,
        status: CommitStatus,
    },
    /// `create_note`
    CreateNote {
        project_id: u64,
        mr_iid: u64,
        body: String,
    },
    /// `get_merge_request`
    GetMergeRequest { project_id: u64, mr_iid: u64 },
    /// `update_labels`
    UpdateLabels {
        project_id: u64,
        mr_iid: u64,
        labels: Vec<String>,
    },
    /// `accept_merge_request`
    AcceptMergeRequest {
        project_id: u64,
        mr_iid: u64,
        options: AcceptOptions,
    },
}

impl ApiCall {
    /// Operation this call corresponds to
    pub const fn operation(&self) -> Operation {
        match self {
            Self::SetCommitStatus { .. } => Operation::SetCommitStatus,
            Self::CreateNote { .. } => Operation::CreateNote,
            Self::GetMergeRequest { .. } => Operation::GetMergeRequest,
            Self::UpdateLabels { .. } => Operation::UpdateMergeRequest,
            Self::AcceptMergeRequest { .. } => Operation::AcceptMergeRequest,
        }
    }
}

/// Recording mock of `MergeRequestApi`
///
/// This manually implements the trait rather than using mockall so that
/// calls can be checked in order across operations.
///
/// Features:
/// - Ordered call log for verification
/// - Configurable merge request returned by `get_merge_request`
/// - Status-code error injection per operation
pub struct MockMergeRequestApi {
    remote_mr: Mutex<Option<MergeRequest>>,
    calls: Mutex<Vec<ApiCall>>,
    failures: Mutex<HashMap<Operation, (u16, String)>>,
}

impl Default for MockMergeRequestApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMergeRequestApi {
    /// Create a mock that accepts every call
    pub fn new() -> Self {
        Self {
            remote_mr: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
        }
    }

    /// Set the merge request returned by `get_merge_request`
    pub fn set_remote_mr(&self, mr: MergeRequest) {
        *self.remote_mr.lock().unwrap() = Some(mr);
    }

    /// Make an operation answer with an unexpected status code
    pub fn fail_with_status(&self, operation: Operation, status: u16, body: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(operation, (status, body.to_string()));
    }

    /// Get all recorded calls, in order
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the operations called, in order
    pub fn operations(&self) -> Vec<Operation> {
        self.calls().iter().map(ApiCall::operation).collect()
    }

    /// Get the label sets sent by `update_labels`
    pub fn label_updates(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ApiCall::UpdateLabels { labels, .. } => Some(labels),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ApiCall) -> Result<()> {
        let operation = call.operation();
        self.calls.lock().unwrap().push(call);

        // Check for injected error
        if let Some((status, body)) = self.failures.lock().unwrap().get(&operation) {
            return Err(Error::UnexpectedStatus {
                operation,
                status: *status,
                body: body.clone(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl MergeRequestApi for MockMergeRequestApi {
    async fn set_commit_status(
        &self,
        project_id: u64,
        sha: &str,
        status: &CommitStatus,
    ) -> Result<()> {
        self.record(ApiCall::SetCommitStatus {
            project_id,
            sha: sha.to_string(),
            status: status.clone(),
        })
    }

    async fn create_note(&self, project_id: u64, mr_iid: u64, body: &str) -> Result<()> {
        self.record(ApiCall::CreateNote {
            project_id,
            mr_iid,
            body: body.to_string(),
        })
    }

    async fn get_merge_request(&self, project_id: u64, mr_iid: u64) -> Result<MergeRequest> {
        self.record(ApiCall::GetMergeRequest { project_id, mr_iid })?;

        self.remote_mr.lock().unwrap().clone().ok_or_else(|| {
            Error::UnexpectedStatus {
                operation: Operation::GetMergeRequest,
                status: 404,
                body: r#"{"message":"404 Not found"}"#.to_string(),
            }
        })
    }

    async fn update_labels(&self, project_id: u64, mr_iid: u64, labels: &[String]) -> Result<()> {
        self.record(ApiCall::UpdateLabels {
            project_id,
            mr_iid,
            labels: labels.to_vec(),
        })
    }

    async fn accept_merge_request(
        &self,
        project_id: u64,
        mr_iid: u64,
        options: AcceptOptions,
    ) -> Result<()> {
        self.record(ApiCall::AcceptMergeRequest {
            project_id,
            mr_iid,
            options,
        })
    }
}
