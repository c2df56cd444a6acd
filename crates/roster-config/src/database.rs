//! Local libSQL database configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    ".roster/roster.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database file. Relative paths resolve against the project root;
    /// `:memory:` keeps everything in memory.
    #[serde(default = "default_path")]
    pub path: String,
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }

    /// Database location for a project, or `:memory:` unchanged.
    #[must_use]
    pub fn resolve(&self, project_root: &Path) -> PathBuf {
        let path = PathBuf::from(&self.path);
        if self.is_in_memory() || path.is_absolute() {
            path
        } else {
            project_root.join(path)
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}
