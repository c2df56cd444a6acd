use std::fmt::Write;

use roster_engine::ItemFailure;
use roster_engine::persist::{ManualAssignment, assign_to_staff};
use serde::Serialize;

use super::collect_indexes;
use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AssignResponse {
    staff_id: String,
    staff_name: String,
    attempted: usize,
    created: usize,
    failed: usize,
    /// Indexes with no stored student.
    skipped: Vec<String>,
    failures: Vec<ItemFailure>,
    message: String,
}

/// Assign the given students to one staff member.
pub async fn run(
    staff_id: &str,
    indexes: &[String],
    file: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let indexes = collect_indexes(indexes, file)?;
    let manual = assign_to_staff(&ctx.service, &ctx.service, &ctx.service, staff_id, &indexes).await?;
    let response = assign_response(manual);
    tracing::info!(
        staff = %response.staff_id,
        created = response.created,
        failed = response.failed,
        skipped = response.skipped.len(),
        "manual assignment finished"
    );
    output(&response, flags.format)
}

fn assign_response(manual: ManualAssignment) -> AssignResponse {
    let ManualAssignment {
        staff,
        outcome,
        skipped,
    } = manual;
    let created = outcome.created();
    let failed = outcome.failed();
    let mut message = format!("Assigned {created} student(s) to {}", staff.display_name());
    if failed > 0 {
        let _ = write!(message, " ({failed} failed)");
    }
    if !skipped.is_empty() {
        let _ = write!(message, "; {} unknown index(es) skipped", skipped.len());
    }
    AssignResponse {
        staff_id: staff.id.clone(),
        staff_name: staff.display_name(),
        attempted: outcome.attempted,
        created,
        failed,
        skipped,
        failures: outcome.failures,
        message,
    }
}
