use std::sync::Mutex;

use crate::error::{AutoCommitError, Result};
use crate::git::{status_args, Identity, Repository};

/// Mock repository for testing without running git
///
/// Every call is recorded as the git argument list the real implementation
/// would run, e.g. `"commit -m release 1.2.4"`.
pub struct MockRepository {
    status_output: String,
    fail_on: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl MockRepository {
    /// Create a mock whose status query reports a clean tree
    pub fn new() -> Self {
        MockRepository {
            status_output: String::new(),
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock whose status query returns `output`
    pub fn with_status(output: impl Into<String>) -> Self {
        MockRepository {
            status_output: output.into(),
            ..Self::new()
        }
    }

    /// Make the first command starting with `prefix` fail
    pub fn fail_on(mut self, prefix: impl Into<String>) -> Self {
        self.fail_on = Some(prefix.into());
        self
    }

    /// Commands recorded so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, args: &[String]) -> Result<()> {
        let line = args.join(" ");

        if let Ok(mut calls) = self.calls.lock() {
            calls.push(line.clone());
        }

        match &self.fail_on {
            Some(prefix) if line.starts_with(prefix.as_str()) => Err(AutoCommitError::command(
                format!("git {}", line),
                1,
                "mock failure",
            )),
            _ => Ok(()),
        }
    }

    fn record_args(&self, args: &[&str]) -> Result<()> {
        let owned: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        self.record(&owned)
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn status(&self, exclusions: Option<&[String]>) -> Result<String> {
        self.record(&status_args(exclusions))?;
        Ok(self.status_output.clone())
    }

    fn restore_tracked(&self) -> Result<()> {
        self.record_args(&["restore", "."])?;
        self.record_args(&["checkout", "--", "."])
    }

    fn remove_untracked(&self) -> Result<()> {
        self.record_args(&["clean", "-fd"])
    }

    fn configure_identity(&self, identity: &Identity) -> Result<()> {
        self.record_args(&["config", "user.name", identity.name.as_str()])?;
        self.record_args(&["config", "user.email", identity.email.as_str()])
    }

    fn stage_all(&self) -> Result<()> {
        self.record_args(&["add", "."])
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.record_args(&["commit", "-m", message])
    }

    fn push(&self) -> Result<()> {
        self.record_args(&["push"])
    }
}
