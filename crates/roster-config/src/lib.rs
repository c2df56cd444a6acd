//! # roster-config
//!
//! Layered configuration loading for Roster using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ROSTER_*` prefix, `__` as separator)
//! 2. Project-level `.roster/config.toml`
//! 3. User-level `~/.config/roster/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ROSTER_DATABASE__PATH` -> `database.path`,
//! `ROSTER_ALLOCATION__TRIGGER_SEMESTER` -> `allocation.trigger_semester`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! use roster_config::RosterConfig;
//!
//! let config = RosterConfig::load_for(Path::new(".")).expect("config");
//! println!("database: {}", config.database.path);
//! ```

mod allocation;
mod database;
mod error;
mod general;

pub use allocation::AllocationConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-project state directory.
pub const PROJECT_DIR: &str = ".roster";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub allocation: AllocationConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl RosterConfig {
    /// Load configuration for a project root and check the values.
    ///
    /// `.env` handling is left to the caller.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_for(project_root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_for(project_root).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns the first out-of-range value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.allocation.validate()?;
        self.general.validate()
    }

    /// Build the figment provider chain for a project root.
    ///
    /// Public so tests can inspect the figment or layer extra providers on top.
    pub fn figment_for(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = project_root.join(PROJECT_DIR).join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("ROSTER_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("roster").join("config.toml"))
    }
}
