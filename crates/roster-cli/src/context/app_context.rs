use std::path::PathBuf;

use anyhow::Context;
use roster_config::RosterConfig;
use roster_db::service::RosterService;
use roster_engine::policy::FirstYearFirstSemester;
use roster_schema::SchemaRegistry;

/// Everything a command handler needs: config, database, schemas.
pub struct AppContext {
    pub project_root: PathBuf,
    pub config: RosterConfig,
    pub service: RosterService,
    pub schema: SchemaRegistry,
}

impl AppContext {
    pub async fn init(project_root: PathBuf, config: RosterConfig) -> anyhow::Result<Self> {
        let db_path = config.database.resolve(&project_root);
        if let Some(parent) = db_path.parent().filter(|_| !config.database.is_in_memory()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let db_path = db_path
            .to_str()
            .context("database path is not valid UTF-8")?
            .to_string();

        let service = RosterService::new_local(&db_path)
            .await
            .with_context(|| format!("failed to open database at {db_path}"))?;
        tracing::debug!(db = %db_path, root = %project_root.display(), "context ready");

        Ok(Self {
            project_root,
            config,
            service,
            schema: SchemaRegistry::new(),
        })
    }

    /// The configured allocation trigger.
    #[must_use]
    pub const fn trigger_policy(&self) -> FirstYearFirstSemester {
        FirstYearFirstSemester::new(
            self.config.allocation.trigger_year,
            self.config.allocation.trigger_semester,
        )
    }
}
