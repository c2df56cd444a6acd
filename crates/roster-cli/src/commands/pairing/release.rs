use anyhow::Context;
use roster_core::entities::Assignment;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ReleaseResponse {
    assignment: Assignment,
}

/// Mark a student's pairing inactive. The mentor stays recorded.
pub async fn run(index: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let assignment = ctx
        .service
        .release_assignment(index)
        .await
        .with_context(|| format!("student '{index}' has no pairing"))?;
    tracing::info!(student = index, staff = %assignment.staff_id, "pairing released");
    output(&ReleaseResponse { assignment }, flags.format)
}
