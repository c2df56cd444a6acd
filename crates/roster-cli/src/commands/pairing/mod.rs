mod assign;
mod check;
mod mentees;
mod release;

use std::path::Path;

use serde::Deserialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PairingCommands;
use crate::commands::shared::files::load_records;
use crate::context::AppContext;

/// Only the index is read from each record; other roster columns are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IndexRecord {
    external_index: String,
}

/// Handle `roster pairing`.
pub async fn handle(action: &PairingCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        PairingCommands::Check { indexes, file } => {
            check::run(indexes, file.as_deref(), ctx, flags).await
        }
        PairingCommands::Assign {
            staff_id,
            indexes,
            file,
        } => assign::run(staff_id, indexes, file.as_deref(), ctx, flags).await,
        PairingCommands::Mentees { staff_id } => mentees::run(staff_id, ctx, flags).await,
        PairingCommands::Release { index } => release::run(index, ctx, flags).await,
    }
}

/// Indexes given on the command line, or read from a roster file.
fn collect_indexes(indexes: &[String], file: Option<&str>) -> anyhow::Result<Vec<String>> {
    let indexes: Vec<String> = match file {
        Some(file) => load_records::<IndexRecord>(Path::new(file))?
            .into_iter()
            .map(|record| record.external_index)
            .collect(),
        None => indexes.to_vec(),
    };
    if indexes.is_empty() {
        anyhow::bail!("no student indexes given; pass them as arguments or with --file");
    }
    Ok(indexes)
}
