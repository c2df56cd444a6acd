//! Per-project write lock. Commands that write to the database hold
//! `.roster/roster.write.lock` for their whole run, so two uploads for the
//! same project never allocate at the same time.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use roster_config::PROJECT_DIR;
use serde::{Deserialize, Serialize};

const LOCK_FILE: &str = "roster.write.lock";
const WAIT_LIMIT: Duration = Duration::from_secs(120);
const POLL_EVERY: Duration = Duration::from_millis(250);

/// Contents of the lock file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct LockOwner {
    pid: u32,
    command: String,
}

/// Removes the lock file when dropped.
pub struct WriteLockGuard {
    path: PathBuf,
}

impl Drop for WriteLockGuard {
    fn drop(&mut self) {
        if let Err(error) = std::fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), %error, "failed to remove write lock");
        }
    }
}

#[derive(Debug)]
enum Busy {
    /// A live process owns the lock.
    Held(LockOwner),
    /// The owner process is gone.
    Stale(LockOwner),
    /// The lock exists but could not be read or parsed.
    Unreadable,
}

pub fn lock_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_DIR).join(LOCK_FILE)
}

/// Wait up to two minutes for the project lock and take it for `command`.
pub async fn acquire_for_project(project_root: &Path, command: &str) -> anyhow::Result<WriteLockGuard> {
    let path = lock_path(project_root);
    let deadline = Instant::now() + WAIT_LIMIT;

    loop {
        let busy = match try_acquire(&path, command) {
            Ok(guard) => return Ok(guard),
            Err(busy) => busy,
        };
        if let Busy::Stale(owner) = &busy {
            tracing::warn!(pid = owner.pid, command = %owner.command, "clearing stale write lock");
            // Another waiter may have cleared it first.
            let _ = std::fs::remove_file(&path);
            continue;
        }
        if Instant::now() >= deadline {
            match busy {
                Busy::Held(owner) => anyhow::bail!(
                    "`roster {}` (pid {}) is still writing to this project; try again when it finishes",
                    owner.command,
                    owner.pid
                ),
                _ => anyhow::bail!(
                    "write lock {} is unreadable; delete it if no roster command is running",
                    path.display()
                ),
            }
        }
        tracing::debug!(?busy, "waiting for write lock");
        tokio::time::sleep(POLL_EVERY).await;
    }
}

fn try_acquire(path: &Path, command: &str) -> Result<WriteLockGuard, Busy> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|_| Busy::Unreadable)?;
    }

    let mut file = match OpenOptions::new().create_new(true).write(true).open(path) {
        Ok(file) => file,
        Err(error) if error.kind() == ErrorKind::AlreadyExists => return Err(inspect(path)),
        Err(_) => return Err(Busy::Unreadable),
    };

    let owner = LockOwner {
        pid: std::process::id(),
        command: command.to_string(),
    };
    let guard = WriteLockGuard {
        path: path.to_path_buf(),
    };
    serde_json::to_writer(&mut file, &owner)
        .map_err(std::io::Error::from)
        .and_then(|()| file.flush())
        .map_err(|_| Busy::Unreadable)?;
    Ok(guard)
}

fn inspect(path: &Path) -> Busy {
    let owner = std::fs::read_to_string(path)
        .ok()
        .and_then(|text| serde_json::from_str::<LockOwner>(&text).ok());
    match owner {
        Some(owner) if is_alive(owner.pid) => Busy::Held(owner),
        Some(owner) => Busy::Stale(owner),
        None => Busy::Unreadable,
    }
}

fn is_alive(pid: u32) -> bool {
    std::process::Command::new("kill")
        .args(["-0", &pid.to_string()])
        .status()
        .is_ok_and(|status| status.success())
}
