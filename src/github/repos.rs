//! GitHub repository listing.

use crate::error::Result;
use crate::github::GitHubClient;
use serde::Deserialize;
use tracing::debug;

const PER_PAGE: usize = 100;
const MAX_PAGES: u32 = 100;

/// Repository information from GitHub API.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepo {
    pub name: String,
    pub clone_url: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default, rename = "private")]
    pub is_private: bool,
}

impl GitHubRepo {
    pub fn new(name: impl Into<String>, clone_url: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            full_name: name.clone(),
            name,
            clone_url: clone_url.into(),
            archived: false,
            fork: false,
            is_private: false,
        }
    }
}

/// Repository enumeration.
pub trait RepoOps {
    /// List every repository of `account` this client may see.
    ///
    /// Anonymous clients get the account's public repositories. Authenticated
    /// clients get everything the credentials can access.
    fn list_repos(&self, account: &str) -> Result<Vec<GitHubRepo>>;
}

impl GitHubClient {
    /// Endpoint for one page of the repository listing.
    ///
    /// Both forms ask for `type=all`. Anonymously that is every public
    /// repository `account` owns or is a member of; with credentials it is
    /// every repository the authenticated user can access.
    pub(crate) fn repos_endpoint(&self, account: &str, page: u32) -> String {
        if self.is_authenticated() {
            format!("/user/repos?type=all&per_page={}&page={}", PER_PAGE, page)
        } else {
            format!(
                "/users/{}/repos?type=all&per_page={}&page={}",
                urlencoding::encode(account),
                PER_PAGE,
                page
            )
        }
    }
}

impl RepoOps for GitHubClient {
    fn list_repos(&self, account: &str) -> Result<Vec<GitHubRepo>> {
        let mut all_repos = Vec::new();

        for page in 1..=MAX_PAGES {
            let endpoint = self.repos_endpoint(account, page);
            debug!("GET {}", endpoint);
            let repos: Vec<GitHubRepo> = self.get(&endpoint)?;
            let last = repos.len() < PER_PAGE;
            all_repos.extend(repos);
            if last {
                break;
            }
        }

        Ok(all_repos)
    }
}

/// Extension methods for filtering repository lists.
pub trait RepoFilterExt {
    /// Filter to non-archived repositories.
    fn active(self) -> Self;

    /// Filter to non-fork repositories.
    fn source_only(self) -> Self;
}

impl RepoFilterExt for Vec<GitHubRepo> {
    fn active(self) -> Self {
        self.into_iter().filter(|r| !r.archived).collect()
    }

    fn source_only(self) -> Self {
        self.into_iter().filter(|r| !r.fork).collect()
    }
}
