use std::collections::BTreeMap;
use std::path::Path;

use roster_core::responses::BatchReport;
use roster_core::rows::{BatchMeta, RowOutcome, RowRejection};
use roster_engine::ItemFailure;
use roster_engine::allocation::AllocationSummary;
use roster_engine::coordinator::BatchCoordinator;
use roster_engine::policy::TriggerPolicy;
use roster_engine::queries::lookup_pairings;
use roster_engine::stats::ScoreSummary;
use roster_schema::RowValidator;
use serde::Serialize;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::UploadArgs;
use crate::commands::shared::files::load_records;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    report: BatchReport,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failures: Vec<ItemFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    allocation: Option<AllocationSummary>,
    /// Students already paired before this upload, with their previous mentor.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    reassigned: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DryRunResponse {
    valid_rows: usize,
    rejected: Vec<RowRejection>,
    meta: BatchMeta,
    would_allocate: bool,
    scores: ScoreSummary,
}

/// Validate the rows in `path` with the explicit metadata as defaults, and
/// derive the batch metadata (explicit values win over the first valid row).
pub fn validate_file(
    path: &Path,
    explicit: BatchMeta,
    ctx: &AppContext,
) -> anyhow::Result<(Vec<RowOutcome>, BatchMeta)> {
    let raw: Vec<Value> = load_records(path)?;
    let validator = RowValidator::new(&ctx.schema)?.with_defaults(explicit.clone());
    let rows = validator.validate_all(&raw);
    let meta = explicit.or(BatchMeta::from_rows(&rows));
    tracing::debug!(rows = rows.len(), ?meta, "upload: rows validated");
    Ok((rows, meta))
}

pub fn score_summary(rows: &[RowOutcome]) -> ScoreSummary {
    ScoreSummary::from_scores(rows.iter().filter_map(|row| row.as_ref().ok()).map(|row| row.score))
}

/// Handle `roster upload`.
pub async fn handle(args: &UploadArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let explicit = BatchMeta {
        admission_year: args.year,
        semester: args.semester,
        department: args.department.clone(),
    };
    let (rows, meta) = validate_file(Path::new(&args.file), explicit, ctx)?;
    let policy = ctx.trigger_policy();

    if args.dry_run {
        let rejected: Vec<RowRejection> = rows.iter().filter_map(|row| row.clone().err()).collect();
        return output(
            &DryRunResponse {
                valid_rows: rows.len() - rejected.len(),
                rejected,
                would_allocate: policy.should_allocate(&meta),
                scores: score_summary(&rows),
                meta,
            },
            flags.format,
        );
    }

    let reassigned = if policy.should_allocate(&meta) {
        let indexes: Vec<String> = rows
            .iter()
            .filter_map(|row| row.as_ref().ok())
            .map(|row| row.external_index.clone())
            .collect();
        let paired = lookup_pairings(&ctx.service, &ctx.service, &indexes).await?;
        if !paired.is_empty() {
            tracing::warn!(count = paired.len(), "upload: students already paired will be reassigned");
        }
        paired
    } else {
        BTreeMap::new()
    };

    let coordinator = BatchCoordinator::new(&ctx.service, &ctx.service, &ctx.service, policy);
    let run = Progress::track(
        &format!("Uploading {} rows", rows.len()),
        "upload failed",
        coordinator.execute(&rows, &meta),
    )
    .await?;

    output(
        &UploadResponse {
            report: run.report,
            failures: run.failures,
            allocation: run.summary,
            reassigned,
        },
        flags.format,
    )
}
