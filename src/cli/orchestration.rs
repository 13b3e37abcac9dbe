//! Main workflow orchestration logic
//!
//! Detect changes, clean up or bump, then commit and push. Argument parsing
//! and runner reporting stay in `main.rs`; this module only needs a
//! [`Repository`] and a resolved [`Config`].

use semver::Version;
use std::path::Path;

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::error::Result;
use crate::git::{Identity, Repository};
use crate::manifest::bump_version_file;
use crate::ui;

/// Name of the step output reporting whether a commit was pushed
pub const CHANGES_MADE_OUTPUT: &str = "changes-made";

/// Result of a successful workflow run
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    /// Nothing to commit
    Clean {
        /// Whether the destructive cleanup ran
        cleaned: bool,
    },
    /// Changes were committed and pushed
    Published {
        /// The bumped version, `None` when bumping was disabled
        version: Option<Version>,
        /// The commit message used
        message: String,
    },
}

impl WorkflowOutcome {
    /// Value for the `changes-made` step output
    pub fn changes_made(&self) -> &'static str {
        match self {
            WorkflowOutcome::Clean { .. } => "",
            WorkflowOutcome::Published { .. } => "true",
        }
    }
}

/// Main auto-commit workflow
///
/// 1. Query the working tree status, honoring the configured exclusions
/// 2. Clean tree: optionally restore tracked files and delete untracked ones
/// 3. Dirty tree: optionally bump the version file
/// 4. Configure the committer, stage, commit and push
///
/// The first error aborts the run. In particular nothing is committed if the
/// version file could not be rewritten, and nothing is pushed if the commit
/// failed.
///
/// # Arguments
///
/// * `repo` - Repository to operate on
/// * `config` - Resolved inputs
/// * `workdir` - Directory the version file path is relative to
pub fn run_workflow<R: Repository>(
    repo: &R,
    config: &Config,
    workdir: &Path,
) -> Result<WorkflowOutcome> {
    let exclusions = config.exclusions();
    let status = repo.status(exclusions.as_deref())?;
    let has_changes = !status.trim().is_empty();
    ui::debug(&format!("hasChanges {}", has_changes));

    if !has_changes {
        let cleaned = config.cleanup_enabled();
        if cleaned {
            ui::display_boundary_warning(&BoundaryWarning::DestructiveCleanup {
                exclusions_active: exclusions.is_some(),
            });
            repo.restore_tracked()?;
            repo.remove_untracked()?;
        }
        ui::display_status("No changes detected.");
        return Ok(WorkflowOutcome::Clean { cleaned });
    }

    let version = if config.bump_enabled() {
        let path = workdir.join(&config.config_json);
        ui::display_status(&format!("Using config file: {}", path.display()));

        let bumped = bump_version_file(&path, &config.release_type)?;
        if !bumped.indent_detected {
            ui::display_boundary_warning(&BoundaryWarning::IndentNotDetected {
                path: config.config_json.clone(),
            });
        }
        ui::display_success(&format!(
            "Bumped version {} -> {}",
            bumped.previous, bumped.next
        ));
        Some(bumped.next)
    } else {
        ui::display_boundary_warning(&BoundaryWarning::BumpDisabled {
            release_type: config.release_type.clone(),
            config_json: config.config_json.clone(),
        });
        None
    };

    repo.configure_identity(&Identity::github_actions())?;

    let rendered = version.as_ref().map(Version::to_string);
    let message = config.render_commit_message(rendered.as_deref());

    repo.stage_all()?;
    repo.commit(&message)?;
    repo.push()?;

    ui::display_success(&format!("Committed and pushed: {}", message));

    Ok(WorkflowOutcome::Published { version, message })
}
