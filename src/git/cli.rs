//! [`GitRunner`] backed by the `git` executable.

use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Command;

use tracing::{debug, warn};

use crate::error::{BackupError, Result};
use crate::git::{GitRunner, parse_local_branches};

/// Runs git as a subprocess in the current working directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: OsString,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCli {
    /// Use `git` from `PATH`.
    pub fn new() -> Self {
        Self {
            program: "git".into(),
        }
    }

    /// Use a specific git executable.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Check that the executable can be started at all.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .output()
            .is_ok_and(|o| o.status.success())
    }

    /// Run git with `args`, returning stdout on success.
    fn run<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
        let command = self.describe(&args);
        debug!("running {}", command);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| BackupError::GitSpawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(BackupError::GitCommand {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn describe(&self, args: &[OsString]) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(args.iter().map(OsString::as_os_str))
            .map(OsStr::to_string_lossy)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn local_branch_exists(&self, name: &str) -> bool {
        let refname = format!("refs/heads/{}", name);
        self.run(["show-ref", "--verify", "--quiet", refname.as_str()])
            .is_ok()
    }

    fn current_branch(&self) -> Option<String> {
        self.run(["symbolic-ref", "--quiet", "--short", "HEAD"])
            .ok()
            .map(|out| out.trim().to_string())
            .filter(|name| !name.is_empty())
    }
}

impl GitRunner for GitCli {
    fn clone_repo(&self, url: &str, target: &Path) -> Result<()> {
        self.run([
            OsStr::new("clone"),
            OsStr::new("-q"),
            OsStr::new(url),
            target.as_os_str(),
        ])?;
        Ok(())
    }

    fn remote_branches(&self) -> Result<Vec<String>> {
        let output = self.run(["for-each-ref", "--format=%(refname)", "refs/remotes"])?;
        Ok(output
            .lines()
            .filter_map(|line| line.trim().strip_prefix("refs/remotes/"))
            .map(String::from)
            .collect())
    }

    fn track_branch(&self, local: &str, remote: &str) -> Result<()> {
        if self.local_branch_exists(local) {
            debug!("branch {} already exists", local);
            return Ok(());
        }
        self.run(["branch", "--quiet", "--track", local, remote])?;
        Ok(())
    }

    fn update(&self) -> Result<()> {
        self.run(["fetch", "--all", "--prune", "--quiet"])?;

        let current = self.current_branch();
        let listing = self.run([
            "for-each-ref",
            "--format=%(refname:short)%09%(upstream:short)%09%(upstream:track)",
            "refs/heads",
        ])?;

        for branch in parse_local_branches(&listing) {
            let Some(upstream) = branch.upstream else {
                continue;
            };
            if branch.gone {
                debug!("upstream {} of {} is gone", upstream, branch.name);
                continue;
            }

            if current.as_deref() == Some(branch.name.as_str()) {
                self.run(["merge", "--ff-only", "--quiet", upstream.as_str()])?;
            } else {
                let refspec = format!("refs/remotes/{}:refs/heads/{}", upstream, branch.name);
                if let Err(e) = self.run(["fetch", "--quiet", ".", refspec.as_str()]) {
                    warn!("Branch {} cannot be fast-forwarded, skipping it: {}", branch.name, e);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_command() {
        let git = GitCli::new();
        let args: Vec<OsString> = ["clone", "-q", "url"].iter().map(OsString::from).collect();
        assert_eq!(git.describe(&args), "git clone -q url");
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let git = GitCli::with_program("definitely-not-a-git-binary-4f1c");
        assert!(!git.is_available());
        let err = git.run(["--version"]).unwrap_err();
        assert!(matches!(err, BackupError::GitSpawn { .. }));
    }
}
