use std::path::Path;

use roster_core::entities::NewStaff;

use crate::cli::GlobalFlags;
use crate::commands::shared::files::load_records;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Import a staff list. Entries with a known email update the existing member.
pub async fn run(file: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let entries: Vec<NewStaff> = load_records(Path::new(file))?;
    let imported = Progress::track(
        &format!("Importing {} staff entries", entries.len()),
        "staff import failed",
        ctx.service.import_staff(&entries),
    )
    .await?;
    if !imported.failures.is_empty() {
        tracing::warn!(failed = imported.failures.len(), "staff import: entries skipped");
    }
    output(&imported, flags.format)
}
