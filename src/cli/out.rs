//! Out command - apply the requested actions to the merge request

use gitlab_mr_resource::build::BuildEnvironment;
use gitlab_mr_resource::comment::{BuildTokens, render_comment};
use gitlab_mr_resource::error::Result;
use gitlab_mr_resource::out::{create_out_plan, execute_out};
use gitlab_mr_resource::platform::GitLabService;
use gitlab_mr_resource::request::{Request, join_under};
use gitlab_mr_resource::response::Response;
use gitlab_mr_resource::snapshot::load_snapshot;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

/// Run the out command
///
/// Reads the request from `input`, works in `<destination>/<repository>`
/// and writes the response to `output` only when every step succeeded.
pub async fn run_out(
    destination: &Path,
    input: impl Read,
    output: impl Write,
    build: &BuildEnvironment,
) -> Result<()> {
    // =========================================================================
    // Phase 1: GATHER - request, snapshot and comment body
    // =========================================================================

    let request = Request::from_reader(input)?;
    let repo_dir = join_under(destination, Path::new(&request.params.repository));
    let snapshot = load_snapshot(&repo_dir)?;

    let comment = match &request.params.comment {
        Some(comment) => {
            let tokens = BuildTokens::new(&request.source, build);
            render_comment(comment, destination, &tokens)?
        }
        None => String::new(),
    };

    // =========================================================================
    // Phase 2: PLAN
    // =========================================================================

    let plan = create_out_plan(&request, &comment, build)?;
    if plan.is_empty() {
        info!(mr_iid = snapshot.iid, "no actions requested");
    } else {
        info!(
            mr_iid = snapshot.iid,
            steps = plan.steps.len(),
            "planned out step"
        );
    }

    // =========================================================================
    // Phase 3: EXECUTE
    // =========================================================================

    let platform = GitLabService::from_source(&request.source)?;
    let outcome = execute_out(&plan, snapshot, &platform).await?;

    Response::new(&outcome.merge_request, &outcome.message()).write_to(output)
}
