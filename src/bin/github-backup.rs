//! CLI for the github-backup tool.

use anyhow::{Context, Result};
use clap::Parser;
use github_backup::github::DEFAULT_API_URL;
use github_backup::prelude::*;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Clones all the repositories from a GitHub account.
/// Restricted to public ones if no password is given.
#[derive(Parser)]
#[command(name = "github-backup")]
#[command(author, version, long_about = None)]
struct Cli {
    /// GitHub username
    user: String,

    /// GitHub password or personal access token
    password: Option<String>,

    /// Destination of the copy (defaults to the current directory)
    #[arg(short = 'd', long = "dest")]
    dest: Option<PathBuf>,

    /// GitHub API root, for GitHub Enterprise
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// git executable to run
    #[arg(long, default_value = "git")]
    git: PathBuf,

    /// Leave out forked repositories
    #[arg(long)]
    skip_forks: bool,

    /// Leave out archived repositories
    #[arg(long)]
    skip_archived: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let dest = match cli.dest {
        Some(dest) => dest,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    info!("Backing up {} into {}", cli.user, dest.display());

    let client = match cli.password {
        Some(password) => GitHubClient::with_credentials(Credentials::new(&cli.user, password)),
        None => GitHubClient::anonymous(),
    }
    .with_base_url(cli.api_url);

    let mut repos = client
        .list_repos(&cli.user)
        .with_context(|| format!("Failed to list repositories of {}", cli.user))?;
    if cli.skip_forks {
        repos = repos.source_only();
    }
    if cli.skip_archived {
        repos = repos.active();
    }
    info!("Found {} repositories", repos.len());

    Backup::new(&dest, GitCli::with_program(cli.git))
        .run(&repos)
        .context("Backup aborted")?;

    Ok(())
}
