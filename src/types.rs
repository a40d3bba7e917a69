//! Core types for gitlab-mr-resource

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A merge request as returned by the GitLab API
///
/// Only the fields the out step reads are kept; everything else in the
/// payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequest {
    /// Instance-wide ID
    pub id: u64,
    /// Project-scoped ID
    pub iid: u64,
    /// Target project ID
    pub project_id: u64,
    /// Project the source branch lives in (differs for forks)
    #[serde(default)]
    pub source_project_id: u64,
    /// Head commit SHA
    #[serde(default)]
    pub sha: String,
    /// Title
    #[serde(default)]
    pub title: String,
    /// Author
    #[serde(default)]
    pub author: Author,
    /// Source branch name
    #[serde(default)]
    pub source_branch: String,
    /// Target branch name
    #[serde(default)]
    pub target_branch: String,
    /// Web URL
    #[serde(default)]
    pub web_url: String,
    /// Labels, in the order GitLab returned them
    #[serde(default)]
    pub labels: Vec<String>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Merge request author
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Username
    #[serde(default)]
    pub username: String,
}

/// Commit status payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStatus {
    /// Build state (`pending`, `running`, `success`, `failed`, `canceled`)
    pub state: String,
    /// Context name shown in the GitLab UI
    pub name: String,
    /// Link to the build
    pub target_url: String,
}

/// Options sent when accepting a merge request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptOptions {
    /// Delete the source branch after merging
    pub should_remove_source_branch: bool,
    /// Defer the merge until the head pipeline succeeds
    pub merge_when_pipeline_succeeds: bool,
}

impl Default for AcceptOptions {
    fn default() -> Self {
        Self {
            should_remove_source_branch: true,
            merge_when_pipeline_succeeds: true,
        }
    }
}
