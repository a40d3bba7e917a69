//! Out planning - pure functions for deciding which steps run
//!
//! No I/O happens here. The comment body is rendered beforehand, so an
//! unreadable comment file fails the run before any remote call.

use crate::build::BuildEnvironment;
use crate::error::Result;
use crate::request::{Action, Request};
use crate::types::{AcceptOptions, CommitStatus};

/// A single step of the out plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutStep {
    /// Set the commit status on the snapshot's head commit
    SetStatus {
        /// Status payload
        status: CommitStatus,
    },
    /// Post a note on the merge request
    Comment {
        /// Rendered comment body
        body: String,
    },
    /// Refresh the merge request, then replace its labels
    EditLabels {
        /// Labels to remove
        remove: Vec<String>,
        /// Labels to add
        add: Vec<String>,
    },
    /// Accept the merge request
    Merge {
        /// Accept options
        options: AcceptOptions,
    },
}

impl std::fmt::Display for OutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SetStatus { status } => write!(f, "set status {}", status.state),
            Self::Comment { .. } => write!(f, "post comment"),
            Self::EditLabels { remove, add } => {
                write!(f, "edit labels (-{} +{})", remove.len(), add.len())
            }
            Self::Merge { .. } => write!(f, "merge"),
        }
    }
}

/// Out plan - ordered steps to perform
///
/// Steps always appear in the order status, comment, labels, merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutPlan {
    /// Ordered steps
    pub steps: Vec<OutStep>,
}

impl OutPlan {
    /// Check if the plan performs no remote mutation
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Build the out plan (PURE)
///
/// # Arguments
/// * `request` - The decoded request
/// * `comment` - Rendered comment body (empty to skip commenting)
/// * `build` - Build metadata for the status name and link
pub fn create_out_plan(
    request: &Request,
    comment: &str,
    build: &BuildEnvironment,
) -> Result<OutPlan> {
    let params = &request.params;
    let mut steps = Vec::new();

    if let Some(state) = params.status() {
        steps.push(OutStep::SetStatus {
            status: CommitStatus {
                state: state.to_string(),
                name: request.source.pipeline_name(build),
                target_url: request.source.target_url(build),
            },
        });
    }

    if !comment.is_empty() {
        steps.push(OutStep::Comment {
            body: comment.to_string(),
        });
    }

    if !params.add_labels().is_empty() || !params.remove_labels().is_empty() {
        steps.push(OutStep::EditLabels {
            remove: params.remove_labels().to_vec(),
            add: params.add_labels().to_vec(),
        });
    }

    if params.action() == Some(Action::Merge) {
        steps.push(OutStep::Merge {
            options: AcceptOptions::default(),
        });
    }

    Ok(OutPlan { steps })
}
