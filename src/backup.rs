//! Sync executor: mirrors a list of repositories into a destination directory.
//!
//! Each repository is either updated (its directory already exists) or
//! cloned. A git command that fails is recorded against its repository and
//! the run moves on; any other error ends the run.

use crate::error::{BackupError, Result};
use crate::git::{GitRunner, branches_to_track};
use crate::github::GitHubRepo;
use crate::workdir::WorkdirGuard;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// What the executor did with a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// The checkout existed and its branches were pulled.
    Update,
    /// The repository was cloned and its remote branches tracked.
    Clone,
}

/// Terminal state of one repository.
#[derive(Debug)]
pub enum SyncStatus {
    Succeeded,
    Failed(BackupError),
}

/// Result for a single repository.
#[derive(Debug)]
pub struct RepoOutcome {
    pub name: String,
    pub path: PathBuf,
    pub action: SyncAction,
    pub status: SyncStatus,
}

impl RepoOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, SyncStatus::Succeeded)
    }

    /// The error that made this repository fail, if any.
    pub fn error(&self) -> Option<&BackupError> {
        match &self.status {
            SyncStatus::Succeeded => None,
            SyncStatus::Failed(e) => Some(e),
        }
    }
}

/// Outcomes of a whole run, in processing order.
#[derive(Debug, Default)]
pub struct BackupReport {
    pub outcomes: Vec<RepoOutcome>,
}

impl BackupReport {
    /// Repositories cloned successfully.
    pub fn cloned(&self) -> usize {
        self.count(SyncAction::Clone)
    }

    /// Repositories updated successfully.
    pub fn updated(&self) -> usize {
        self.count(SyncAction::Update)
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_success()).count()
    }

    /// Outcomes that ended in failure.
    pub fn failures(&self) -> impl Iterator<Item = &RepoOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    fn count(&self, action: SyncAction) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.action == action && o.is_success())
            .count()
    }
}

/// Mirrors repositories into `dest` through a [`GitRunner`].
///
/// # Example
///
/// ```rust,no_run
/// use github_backup::backup::Backup;
/// use github_backup::git::GitCli;
/// use github_backup::github::{GitHubClient, RepoOps};
///
/// let repos = GitHubClient::anonymous().list_repos("octocat")?;
/// let report = Backup::new("./mirror", GitCli::new()).run(&repos)?;
/// println!("{} cloned, {} failed", report.cloned(), report.failed());
/// # Ok::<(), github_backup::error::BackupError>(())
/// ```
pub struct Backup<G> {
    dest: PathBuf,
    git: G,
}

impl<G: GitRunner> Backup<G> {
    /// Create an executor writing checkouts under `dest`.
    ///
    /// A relative `dest` is resolved against the current directory now, so
    /// repository paths stay valid while the working directory moves.
    pub fn new(dest: impl AsRef<Path>, git: G) -> Self {
        let dest = dest.as_ref();
        let dest = std::path::absolute(dest).unwrap_or_else(|_| dest.to_path_buf());
        Self { dest, git }
    }

    pub fn dest(&self) -> &Path {
        &self.dest
    }

    pub fn git(&self) -> &G {
        &self.git
    }

    /// Process every repository in order.
    ///
    /// Stops at the first error that is not specific to one repository.
    pub fn run(&self, repos: &[GitHubRepo]) -> Result<BackupReport> {
        let mut report = BackupReport::default();

        for repo in repos {
            report.outcomes.push(self.sync_repo(repo)?);
        }

        info!(
            "Backup finished: {} cloned, {} updated, {} failed",
            report.cloned(),
            report.updated(),
            report.failed()
        );
        Ok(report)
    }

    /// Clone or update a single repository.
    ///
    /// Git failures end up in the returned outcome. Other errors propagate.
    pub fn sync_repo(&self, repo: &GitHubRepo) -> Result<RepoOutcome> {
        let path = self.dest.join(&repo.name);
        info!("Backing up repository {}", repo.name);

        let (action, result) = if path.exists() {
            info!(
                "The repository {} already exists on destination. Pulling all branches",
                repo.name
            );
            (SyncAction::Update, self.pull_all(&path))
        } else {
            info!(
                "The repository {} does not exist on destination. Cloning it",
                repo.name
            );
            (SyncAction::Clone, self.clone_and_track(repo, &path))
        };

        let status = match result {
            Ok(()) => SyncStatus::Succeeded,
            Err(e) if !e.is_repo_local() => return Err(e),
            Err(e) => {
                match action {
                    SyncAction::Update => error!(
                        "There was an error fetching the branches from the repository {}, skipping it: {}",
                        repo.name, e
                    ),
                    SyncAction::Clone => {
                        error!("Error cloning repository {}, skipping it: {}", repo.name, e)
                    }
                }
                SyncStatus::Failed(e)
            }
        };

        Ok(RepoOutcome {
            name: repo.name.clone(),
            path,
            action,
            status,
        })
    }

    fn pull_all(&self, path: &Path) -> Result<()> {
        let _guard = WorkdirGuard::enter(path)?;
        self.git.update()
    }

    fn clone_and_track(&self, repo: &GitHubRepo, path: &Path) -> Result<()> {
        self.git.clone_repo(&repo.clone_url, path)?;

        let _guard = WorkdirGuard::enter(path)?;
        for branch in branches_to_track(&self.git.remote_branches()?) {
            self.git.track_branch(&branch.local, &branch.remote)?;
        }
        Ok(())
    }
}
