use std::path::PathBuf;

use anyhow::Context;
use roster_config::{PROJECT_DIR, RosterConfig};
use roster_db::service::RosterService;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InitResponse {
    project_root: String,
    database: String,
    config_created: bool,
}

/// Handle `roster init`: create `.roster/`, a default `config.toml`, and the
/// database with its schema. Safe to re-run.
pub async fn handle(args: &InitArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let root = PathBuf::from(&args.path);
    let state_dir = root.join(PROJECT_DIR);
    std::fs::create_dir_all(&state_dir)
        .with_context(|| format!("failed to create {}", state_dir.display()))?;

    let config_path = state_dir.join("config.toml");
    let config_created = !config_path.exists();
    if config_created {
        let rendered = toml::to_string_pretty(&RosterConfig::default())
            .context("failed to render default config")?;
        std::fs::write(&config_path, rendered)
            .with_context(|| format!("failed to write {}", config_path.display()))?;
    }

    let config = RosterConfig::load_for(&root)?;
    let db_path = config.database.resolve(&root);
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let db_path = db_path.to_string_lossy().into_owned();
    RosterService::new_local(&db_path)
        .await
        .with_context(|| format!("failed to initialize database at {db_path}"))?;
    tracing::info!(root = %root.display(), "project initialized");

    output(
        &InitResponse {
            project_root: root.display().to_string(),
            database: db_path,
            config_created,
        },
        flags.format,
    )
}
