//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the handful of Git
//! operations the workflow needs, so the workflow can run against the real
//! `git` executable or against a scripted mock in tests.
//!
//! # Overview
//!
//! - [cli::GitCli]: Runs the `git` command-line tool in a working directory
//! - [mock::MockRepository]: Records calls and replays scripted results
//!
//! # Usage
//!
//! ```rust
//! # use auto_commit_and_version::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> auto_commit_and_version::Result<()> {
//! let status = repo.status(None)?;
//! if !status.trim().is_empty() {
//!     repo.stage_all()?;
//!     repo.commit("Automated commit")?;
//!     repo.push()?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod mock;

pub use cli::GitCli;
pub use mock::MockRepository;

use crate::error::Result;

/// Committer identity configured before committing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Identity {
            name: name.into(),
            email: email.into(),
        }
    }

    /// The identity used by automated commits from Actions workflows
    pub fn github_actions() -> Self {
        Identity::new("github-actions", "github-actions@github.com")
    }
}

/// Builds the argument list of the status query.
///
/// With exclusions the query is limited to tracked files under the current
/// directory, minus the given pathspecs.
pub fn status_args(exclusions: Option<&[String]>) -> Vec<String> {
    let mut args = vec!["status".to_string(), "--porcelain".to_string()];

    if let Some(patterns) = exclusions {
        args.push("--untracked-files=no".to_string());
        args.push("--".to_string());
        args.push(".".to_string());
        args.extend(patterns.iter().cloned());
    }

    args
}

/// Common git operation trait for abstraction
///
/// ## Error Handling
///
/// Every method returns [crate::error::Result<T>]. A command that exits
/// non-zero maps to [crate::error::AutoCommitError::Command]; callers abort
/// the run on the first error.
pub trait Repository: Send + Sync {
    /// Porcelain status output; empty when there is nothing to commit
    ///
    /// # Arguments
    /// * `exclusions` - Pathspecs to exclude; `Some` also hides untracked files
    fn status(&self, exclusions: Option<&[String]>) -> Result<String>;

    /// Restores tracked files to their committed state (`git restore .`,
    /// then `git checkout -- .`)
    fn restore_tracked(&self) -> Result<()>;

    /// Deletes untracked files and directories (`git clean -fd`)
    fn remove_untracked(&self) -> Result<()>;

    /// Sets `user.name` and `user.email` in the repository config
    fn configure_identity(&self, identity: &Identity) -> Result<()>;

    /// Stages every change under the working directory (`git add .`)
    fn stage_all(&self) -> Result<()>;

    /// Commits the staged changes
    fn commit(&self, message: &str) -> Result<()>;

    /// Pushes the current branch to its upstream
    fn push(&self) -> Result<()>;
}
