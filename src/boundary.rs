use std::fmt;

/// Non-fatal conditions met along the way. They are reported to the runner
/// as warnings and never stop the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Changes will be committed without touching the version file
    BumpDisabled {
        release_type: String,
        config_json: String,
    },
    /// The version file had no indentation to copy; the default unit was used
    IndentNotDetected { path: String },
    /// The clean-tree path is about to discard local modifications
    DestructiveCleanup { exclusions_active: bool },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::BumpDisabled {
                release_type,
                config_json,
            } => {
                write!(
                    f,
                    "Version bump disabled (release type '{}', config file '{}'); committing without a version",
                    release_type, config_json
                )
            }
            BoundaryWarning::IndentNotDetected { path } => {
                write!(
                    f,
                    "Could not detect indentation of '{}'; writing it with two spaces",
                    path
                )
            }
            BoundaryWarning::DestructiveCleanup { exclusions_active } => {
                if *exclusions_active {
                    write!(
                        f,
                        "No tracked changes outside the excluded files; discarding modifications to excluded files and removing untracked files"
                    )
                } else {
                    write!(
                        f,
                        "Working tree is clean; restoring tracked files and removing untracked files"
                    )
                }
            }
        }
    }
}
