//! Merge request snapshot written by the check/in steps

use crate::error::{Error, Result};
use crate::types::MergeRequest;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Snapshot location relative to the repository directory
pub const SNAPSHOT_FILE: &str = ".git/merge-request.json";

/// Get path to the snapshot file.
pub fn snapshot_path(repo_dir: &Path) -> PathBuf {
    repo_dir.join(SNAPSHOT_FILE)
}

/// Load the merge request snapshot from disk.
///
/// There is no fallback: a missing or malformed snapshot is an error.
pub fn load_snapshot(repo_dir: &Path) -> Result<MergeRequest> {
    let path = snapshot_path(repo_dir);

    let content = fs::read_to_string(&path)
        .map_err(|e| Error::Snapshot(format!("failed to read {}: {e}", path.display())))?;

    let mr: MergeRequest = serde_json::from_str(&content)
        .map_err(|e| Error::Snapshot(format!("failed to parse {}: {e}", path.display())))?;

    debug!(mr_iid = mr.iid, project_id = mr.project_id, "loaded snapshot");
    Ok(mr)
}
