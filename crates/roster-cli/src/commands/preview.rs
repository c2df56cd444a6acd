use std::path::Path;

use roster_core::responses::BatchReport;
use roster_core::rows::BatchMeta;
use roster_engine::allocation::AllocationSummary;
use roster_engine::coordinator::BatchCoordinator;
use roster_engine::memory::MemoryStore;
use roster_engine::stats::ScoreSummary;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PreviewArgs;
use crate::commands::upload::{score_summary, validate_file};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PreviewResponse {
    scores: ScoreSummary,
    report: BatchReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    allocation: Option<AllocationSummary>,
}

/// Handle `roster preview`: run the batch against an in-memory copy of the
/// department's active staff, forcing allocation, and show the result.
pub async fn handle(args: &PreviewArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let explicit = BatchMeta {
        department: Some(args.department.clone()),
        ..BatchMeta::default()
    };
    let (rows, meta) = validate_file(Path::new(&args.file), explicit, ctx)?;

    let allocators = ctx.service.active_allocators(&args.department).await?;
    let sandbox = MemoryStore::with_staff(allocators).await;
    let coordinator = BatchCoordinator::new(&sandbox, &sandbox, &sandbox, |_: &BatchMeta| true);
    let run = coordinator.execute(&rows, &meta).await?;

    output(
        &PreviewResponse {
            scores: score_summary(&rows),
            report: run.report,
            allocation: run.summary,
        },
        flags.format,
    )
}
