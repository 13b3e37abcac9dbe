use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{AutoCommitError, Result};
use crate::git::{status_args, Identity};
use crate::ui;

const GIT: &str = "git";

/// Stands in for stderr when the output went to the log instead of a buffer
const STREAMED_STDERR: &str = "see the command output above";

/// Runs the `git` executable inside a working directory.
///
/// The directory is checked with `git2` when opened; every operation after
/// that goes through the command line so that the runner's credentials and
/// pathspec handling apply.
pub struct GitCli {
    workdir: PathBuf,
    branch: Option<String>,
}

impl GitCli {
    /// Opens the repository containing `path`.
    ///
    /// Commands run in `path` itself, not the repository root, so relative
    /// pathspecs such as `.` keep their meaning.
    ///
    /// # Returns
    /// * `Ok(GitCli)` - `path` lies inside a work tree
    /// * `Err` - Not a repository, or a bare one
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = git2::Repository::discover(path)?;

        if repo.is_bare() {
            return Err(AutoCommitError::config(format!(
                "'{}' is a bare repository; a working tree is required",
                path.display()
            )));
        }

        let branch = repo
            .head()
            .ok()
            .and_then(|head| head.shorthand().map(str::to_string));

        Ok(GitCli {
            workdir: path.to_path_buf(),
            branch,
        })
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Checked-out branch, if HEAD points at one with commits
    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    /// Runs git with `args`, returning captured stdout.
    ///
    /// Only the status query needs its output, so only it is captured.
    fn capture(&self, args: &[String]) -> Result<String> {
        ui::display_command(GIT, args);

        let output = Command::new(GIT)
            .args(args)
            .current_dir(&self.workdir)
            .output()?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        ui::relay_output(&stdout, &stderr);

        if !output.status.success() {
            return Err(AutoCommitError::command(
                format!("{} {}", GIT, args.join(" ")),
                output.status.code().unwrap_or(-1),
                stderr.trim(),
            ));
        }

        Ok(stdout)
    }

    /// Runs git with `args`, streaming its output straight to the log.
    fn exec(&self, args: &[&str]) -> Result<()> {
        let owned: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        ui::display_command(GIT, &owned);

        let status = Command::new(GIT)
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        if !status.success() {
            return Err(AutoCommitError::command(
                format!("{} {}", GIT, owned.join(" ")),
                status.code().unwrap_or(-1),
                STREAMED_STDERR,
            ));
        }

        Ok(())
    }
}

impl super::Repository for GitCli {
    fn status(&self, exclusions: Option<&[String]>) -> Result<String> {
        self.capture(&status_args(exclusions))
    }

    fn restore_tracked(&self) -> Result<()> {
        self.exec(&["restore", "."])?;
        self.exec(&["checkout", "--", "."])?;
        Ok(())
    }

    fn remove_untracked(&self) -> Result<()> {
        self.exec(&["clean", "-fd"])?;
        Ok(())
    }

    fn configure_identity(&self, identity: &Identity) -> Result<()> {
        self.exec(&["config", "user.name", identity.name.as_str()])?;
        self.exec(&["config", "user.email", identity.email.as_str()])?;
        Ok(())
    }

    fn stage_all(&self) -> Result<()> {
        self.exec(&["add", "."])?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.exec(&["commit", "-m", message])?;
        Ok(())
    }

    fn push(&self) -> Result<()> {
        self.exec(&["push"])?;
        Ok(())
    }
}
