use std::collections::BTreeMap;

use roster_engine::queries::lookup_pairings;
use serde::Serialize;

use super::collect_indexes;
use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PairingCheckResponse {
    /// Student index to the display name of their current mentor.
    paired: BTreeMap<String, String>,
    unpaired: Vec<String>,
}

/// Report which of the given students already hold an active mentor.
pub async fn run(
    indexes: &[String],
    file: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let indexes = collect_indexes(indexes, file)?;

    let paired = lookup_pairings(&ctx.service, &ctx.service, &indexes).await?;
    output(&check_response(&indexes, paired), flags.format)
}

fn check_response(indexes: &[String], paired: BTreeMap<String, String>) -> PairingCheckResponse {
    let mut unpaired: Vec<String> = indexes
        .iter()
        .map(|index| index.trim())
        .filter(|index| !index.is_empty() && !paired.contains_key(*index))
        .map(String::from)
        .collect();
    unpaired.sort();
    unpaired.dedup();
    PairingCheckResponse { paired, unpaired }
}
