//! Branch selection and parsing helpers.

use std::collections::HashSet;

/// Remote branch names that never get a local tracking branch.
const UNTRACKED: &[&str] = &["HEAD", "master"];

/// A local branch to create for a remote-tracking branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedBranch {
    pub local: String,
    pub remote: String,
}

/// Pick the remote branches that get a local tracking branch after a clone.
///
/// `origin/feature/x` becomes local `feature/x`. `HEAD` and `master` are
/// skipped, and when two remotes carry the same branch the first one wins.
pub fn branches_to_track<S: AsRef<str>>(remote_branches: &[S]) -> Vec<TrackedBranch> {
    let mut seen = HashSet::new();
    let mut tracked = Vec::new();

    for remote in remote_branches {
        let remote = remote.as_ref().trim();
        let Some((_, local)) = remote.split_once('/') else {
            continue;
        };
        if local.is_empty() || UNTRACKED.contains(&local) {
            continue;
        }
        if seen.insert(local.to_string()) {
            tracked.push(TrackedBranch {
                local: local.to_string(),
                remote: remote.to_string(),
            });
        }
    }

    tracked
}

/// A local branch and the upstream it follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalBranch {
    pub name: String,
    pub upstream: Option<String>,
    /// The upstream ref no longer exists on the remote.
    pub gone: bool,
}

/// Parse `git for-each-ref --format='%(refname:short)%09%(upstream:short)%09%(upstream:track)'`.
pub fn parse_local_branches(output: &str) -> Vec<LocalBranch> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut fields = line.split('\t');
            let name = fields.next().unwrap_or_default().trim().to_string();
            let upstream = fields
                .next()
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(String::from);
            let gone = fields.next().is_some_and(|t| t.contains("gone"));
            LocalBranch {
                name,
                upstream,
                gone,
            }
        })
        .collect()
}
