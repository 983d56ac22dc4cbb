//! # GitHub Backup
//!
//! Mirror every repository of a GitHub account into a local directory.
//!
//! Repositories missing from the destination are cloned, and every remote
//! branch except `HEAD` and `master` gets a local tracking branch. Repositories
//! already present are fetched and their tracking branches fast-forwarded.
//! A failure in one repository is logged and recorded, and the run moves on.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use github_backup::prelude::*;
//!
//! // Public repositories only
//! let client = GitHubClient::anonymous();
//! let repos = client.list_repos("octocat")?;
//!
//! let report = Backup::new("./octocat", GitCli::new()).run(&repos)?;
//! for failed in report.failures() {
//!     eprintln!("{} failed", failed.name);
//! }
//! # Ok::<(), github_backup::error::BackupError>(())
//! ```
//!
//! ## Private Repositories
//!
//! ```rust,no_run
//! use github_backup::prelude::*;
//!
//! let client = GitHubClient::with_credentials(Credentials::new("octocat", "ghp_token"));
//! let repos = client.list_repos("octocat")?;
//! # Ok::<(), github_backup::error::BackupError>(())
//! ```

pub mod backup;
pub mod error;
pub mod git;
pub mod github;
pub mod workdir;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::backup::{Backup, BackupReport, RepoOutcome, SyncAction, SyncStatus};
    pub use crate::error::{BackupError, Result};
    pub use crate::git::{GitCli, GitRunner};
    pub use crate::github::{Credentials, GitHubClient, GitHubRepo, RepoFilterExt, RepoOps};
    pub use crate::workdir::WorkdirGuard;
}

pub use prelude::*;
