use std::path::Path;

use anyhow::Context;
use roster_config::RosterConfig;

/// Load the project's `.env` (or the nearest one found by `dotenvy`), then the
/// layered config for `project_root`.
pub fn load_config(project_root: &Path) -> anyhow::Result<RosterConfig> {
    let env_path = project_root.join(".env");
    let loaded = if env_path.is_file() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to read {}", env_path.display()))?;
        Some(env_path)
    } else {
        dotenvy::dotenv().ok()
    };
    if let Some(path) = &loaded {
        tracing::debug!(env = %path.display(), "environment file loaded");
    }

    RosterConfig::load_for(project_root)
        .with_context(|| format!("invalid roster config under {}", project_root.display()))
}
