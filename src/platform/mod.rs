//! Merge request platform service
//!
//! The out step only needs five remote calls. They sit behind
//! [`MergeRequestApi`] so the orchestrator can be exercised without a server.

mod gitlab;

pub use gitlab::GitLabService;

use crate::error::Result;
use crate::types::{AcceptOptions, CommitStatus, MergeRequest};
use async_trait::async_trait;

/// Remote calls made by the out step, used to label failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Set a commit status
    SetCommitStatus,
    /// Create a merge request note
    CreateNote,
    /// Fetch the merge request
    GetMergeRequest,
    /// Update the merge request labels
    UpdateMergeRequest,
    /// Accept the merge request
    AcceptMergeRequest,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SetCommitStatus => write!(f, "Set commit status"),
            Self::CreateNote => write!(f, "Add merge request comment"),
            Self::GetMergeRequest => write!(f, "Refresh merge request"),
            Self::UpdateMergeRequest => write!(f, "Update merge request"),
            Self::AcceptMergeRequest => write!(f, "Accept merge request"),
        }
    }
}

/// Merge request operations used by the out step
///
/// Each call succeeds only on its single expected status code; anything
/// else is an error carrying the status and response body.
#[async_trait]
pub trait MergeRequestApi: Send + Sync {
    /// Set a commit status on `sha` in `project_id` (expects 201)
    async fn set_commit_status(&self, project_id: u64, sha: &str, status: &CommitStatus)
    -> Result<()>;

    /// Post a note on a merge request (expects 201)
    async fn create_note(&self, project_id: u64, mr_iid: u64, body: &str) -> Result<()>;

    /// Fetch the current state of a merge request (expects 200)
    async fn get_merge_request(&self, project_id: u64, mr_iid: u64) -> Result<MergeRequest>;

    /// Replace the label set of a merge request (expects 200)
    async fn update_labels(&self, project_id: u64, mr_iid: u64, labels: &[String]) -> Result<()>;

    /// Accept a merge request (expects 200)
    async fn accept_merge_request(
        &self,
        project_id: u64,
        mr_iid: u64,
        options: AcceptOptions,
    ) -> Result<()>;
}
