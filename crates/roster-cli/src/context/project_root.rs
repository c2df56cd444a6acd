use std::path::{Path, PathBuf};

use roster_config::PROJECT_DIR;

/// Nearest directory at or above `start` that holds a `.roster` state dir.
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_DIR).is_dir())
        .map(Path::to_path_buf)
}
