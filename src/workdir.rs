//! Scoped working-directory changes.
//!
//! The process working directory is global state. [`WorkdirGuard`] changes it
//! for as long as the guard lives and restores the previous directory when
//! dropped, whether the scope ends normally, through `?`, or by unwinding.
//!
//! ```rust,no_run
//! use github_backup::workdir::WorkdirGuard;
//!
//! {
//!     let _guard = WorkdirGuard::enter("/tmp")?;
//!     // commands spawned here run in /tmp
//! }
//! // back in the original directory
//! # Ok::<(), github_backup::error::BackupError>(())
//! ```

use crate::error::{BackupError, Result};
use std::path::{Path, PathBuf};
use tracing::error;

/// Restores the captured working directory on drop.
#[must_use = "the previous directory is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct WorkdirGuard {
    previous: PathBuf,
}

impl WorkdirGuard {
    /// Record the current directory and change into `path`.
    ///
    /// On failure the working directory is left untouched.
    pub fn enter(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let previous = std::env::current_dir()?;
        std::env::set_current_dir(path).map_err(|source| BackupError::EnterDir {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { previous })
    }

    /// The directory that will be restored.
    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for WorkdirGuard {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.previous) {
            error!(
                "Could not restore working directory {}: {}",
                self.previous.display(),
                e
            );
        }
    }
}

/// Serializes tests that touch the process working directory.
#[cfg(test)]
pub(crate) fn cwd_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::Mutex;
    static LOCK: Mutex<()> = Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_enter_and_restore() {
        let _lock = cwd_lock();
        let before = std::env::current_dir().unwrap();
        let dir = TempDir::new().unwrap();
        let target = dir.path().canonicalize().unwrap();

        {
            let guard = WorkdirGuard::enter(&target).unwrap();
            assert_eq!(guard.previous(), before);
            assert_eq!(std::env::current_dir().unwrap(), target);
        }

        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_restores_on_error_return() {
        let _lock = cwd_lock();
        let before = std::env::current_dir().unwrap();
        let dir = TempDir::new().unwrap();

        fn failing(path: &Path) -> Result<()> {
            let _guard = WorkdirGuard::enter(path)?;
            Err(BackupError::GitHub {
                message: "boom".into(),
            })
        }

        assert!(failing(dir.path()).is_err());
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_restores_on_panic() {
        let _lock = cwd_lock();
        let before = std::env::current_dir().unwrap();
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        let result = std::panic::catch_unwind(move || {
            let _guard = WorkdirGuard::enter(&path).unwrap();
            panic!("inside guarded scope");
        });

        assert!(result.is_err());
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_enter_missing_directory_leaves_cwd() {
        let _lock = cwd_lock();
        let before = std::env::current_dir().unwrap();
        let dir = TempDir::new().unwrap();

        let err = WorkdirGuard::enter(dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, BackupError::EnterDir { .. }));
        assert_eq!(std::env::current_dir().unwrap(), before);
    }
}
