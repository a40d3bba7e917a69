//! Shared test fixtures

#![allow(dead_code)]

mod mock_platform;

pub use mock_platform::{ApiCall, MockMergeRequestApi};

use gitlab_mr_resource::types::{Author, MergeRequest};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Build a merge request with predictable field values
pub fn make_mr(iid: u64, labels: &[&str]) -> MergeRequest {
    MergeRequest {
        id: 1000 + iid,
        iid,
        project_id: 7,
        source_project_id: 9,
        sha: format!("sha{iid}"),
        title: format!("Feature {iid}"),
        author: Author {
            name: "Jane Doe".to_string(),
            username: "jdoe".to_string(),
        },
        source_branch: format!("feature-{iid}"),
        target_branch: "main".to_string(),
        web_url: format!("https://gitlab.example.com/group/project/-/merge_requests/{iid}"),
        labels: labels.iter().map(ToString::to_string).collect(),
        updated_at: Some("2024-05-01T12:00:00Z".parse().unwrap()),
    }
}

/// Convert string literals to owned label names
pub fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

/// A destination directory laid out the way the get step leaves it
///
/// ```text
/// <root>/
///   <repository>/.git/merge-request.json
/// ```
pub struct TempDestination {
    dir: TempDir,
    repository: String,
}

impl TempDestination {
    /// Create a destination holding `mr` as the snapshot of `repository`
    pub fn new(repository: &str, mr: &MergeRequest) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let git_dir = dir.path().join(repository).join(".git");
        fs::create_dir_all(&git_dir).expect("create .git dir");
        fs::write(
            git_dir.join("merge-request.json"),
            serde_json::to_string(mr).expect("serialize snapshot"),
        )
        .expect("write snapshot");

        Self {
            dir,
            repository: repository.to_string(),
        }
    }

    /// Destination root
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Repository directory below the destination
    pub fn repo_dir(&self) -> PathBuf {
        self.dir.path().join(&self.repository)
    }

    /// Write a file relative to the destination root
    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(path, content).expect("write file");
    }
}
