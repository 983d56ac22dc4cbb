//! Git operations needed to mirror a repository.
//!
//! [`GitRunner`] is the seam between the sync executor and git itself.
//! [`GitCli`] drives the system `git` executable; tests plug in fakes.
//!
//! Every method except [`GitRunner::clone_repo`] acts on the repository in
//! the current working directory, so callers enter the checkout with a
//! [`WorkdirGuard`](crate::workdir::WorkdirGuard) first.
//!
//! # Example
//!
//! ```rust,no_run
//! use github_backup::git::{GitCli, GitRunner};
//! use github_backup::workdir::WorkdirGuard;
//!
//! let git = GitCli::new();
//! let _guard = WorkdirGuard::enter("./mirror/foo")?;
//! git.update()?;
//! # Ok::<(), github_backup::error::BackupError>(())
//! ```

mod branch;
mod cli;

pub use branch::{LocalBranch, TrackedBranch, branches_to_track, parse_local_branches};
pub use cli::GitCli;

use crate::error::Result;
use std::path::Path;

/// The git operations the sync executor relies on.
pub trait GitRunner {
    /// Clone `url` quietly into `target`.
    fn clone_repo(&self, url: &str, target: &Path) -> Result<()>;

    /// List remote-tracking branches as `<remote>/<branch>`.
    fn remote_branches(&self) -> Result<Vec<String>>;

    /// Create local branch `local` tracking `remote`.
    fn track_branch(&self, local: &str, remote: &str) -> Result<()>;

    /// Fetch every remote and fast-forward the local branches that track them.
    fn update(&self) -> Result<()>;
}
