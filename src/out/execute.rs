//! Out execution - effectful operations
//!
//! Runs an `OutPlan` against the platform API. The first failing call
//! aborts the run; later steps are never attempted.

use crate::error::Result;
use crate::labels::{edit_labels, format_labels};
use crate::out::plan::{OutPlan, OutStep};
use crate::platform::MergeRequestApi;
use crate::types::MergeRequest;
use tracing::info;

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutOutcome {
    /// Merge request state after the run (refreshed if labels were edited)
    pub merge_request: MergeRequest,
    /// Summary lines, one per action taken
    pub summary: Vec<String>,
}

impl OutOutcome {
    /// Summary joined into the `message` metadata value
    pub fn message(&self) -> String {
        self.summary.join("\n")
    }
}

/// Execute the out plan (EFFECTFUL)
///
/// # Arguments
/// * `plan` - The steps to perform
/// * `snapshot` - Merge request state loaded from disk
/// * `platform` - Platform service for API calls
pub async fn execute_out(
    plan: &OutPlan,
    snapshot: MergeRequest,
    platform: &dyn MergeRequestApi,
) -> Result<OutOutcome> {
    let mut mr = snapshot;
    let mut summary = Vec::new();

    for step in &plan.steps {
        info!(mr_iid = mr.iid, %step, "running step");

        match step {
            OutStep::SetStatus { status } => {
                platform
                    .set_commit_status(mr.source_project_id, &mr.sha, status)
                    .await?;
                summary.push(format!("Set Status: {}", status.state));
            }
            OutStep::Comment { body } => {
                platform.create_note(mr.project_id, mr.iid, body).await?;
                summary.push(format!("New comment: {body}"));
            }
            OutStep::EditLabels { remove, add } => {
                // The snapshot may predate label changes made by other jobs
                mr = platform.get_merge_request(mr.project_id, mr.iid).await?;

                let labels = edit_labels(&mr.labels, remove, add);
                summary.push(format!("Current Labels: {}", format_labels(&mr.labels)));

                platform
                    .update_labels(mr.project_id, mr.iid, &labels)
                    .await?;
                summary.push(format!("New Labels: {}", format_labels(&labels)));
                mr.labels = labels;
            }
            OutStep::Merge { options } => {
                platform
                    .accept_merge_request(mr.project_id, mr.iid, *options)
                    .await?;
                summary.push("Merge: accepted".to_string());
            }
        }
    }

    Ok(OutOutcome {
        merge_request: mr,
        summary,
    })
}
