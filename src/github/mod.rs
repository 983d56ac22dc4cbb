//! GitHub API integration.
//!
//! Lists the repositories of an account, either anonymously (public
//! repositories only) or with basic-auth credentials (everything the
//! credentials can see).
//!
//! # Example
//!
//! ```rust,no_run
//! use github_backup::github::{GitHubClient, RepoOps};
//!
//! let client = GitHubClient::anonymous();
//!
//! for repo in client.list_repos("octocat")? {
//!     println!("{}: {}", repo.name, repo.clone_url);
//! }
//! # Ok::<(), github_backup::error::BackupError>(())
//! ```

mod client;
mod repos;

pub use client::{Credentials, DEFAULT_API_URL, GitHubClient};
pub use repos::{GitHubRepo, RepoFilterExt, RepoOps};
