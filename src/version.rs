use semver::{BuildMetadata, Prerelease, Version};
use std::fmt;
use std::str::FromStr;

use crate::error::{AutoCommitError, Result};

/// The kind of increment to apply to a version.
///
/// Names follow the common `semver` tooling vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseType {
    Major,
    Premajor,
    Minor,
    Preminor,
    Patch,
    Prepatch,
    Prerelease,
}

impl ReleaseType {
    pub fn name(&self) -> &'static str {
        match self {
            ReleaseType::Major => "major",
            ReleaseType::Premajor => "premajor",
            ReleaseType::Minor => "minor",
            ReleaseType::Preminor => "preminor",
            ReleaseType::Patch => "patch",
            ReleaseType::Prepatch => "prepatch",
            ReleaseType::Prerelease => "prerelease",
        }
    }
}

impl FromStr for ReleaseType {
    type Err = AutoCommitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(ReleaseType::Major),
            "premajor" => Ok(ReleaseType::Premajor),
            "minor" => Ok(ReleaseType::Minor),
            "preminor" => Ok(ReleaseType::Preminor),
            "patch" => Ok(ReleaseType::Patch),
            "prepatch" => Ok(ReleaseType::Prepatch),
            "prerelease" => Ok(ReleaseType::Prerelease),
            other => Err(AutoCommitError::invalid_release_type(other)),
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Largest value accepted for a numeric version component, 2^53 - 1.
///
/// Version files are JSON, and most JSON tooling stores integers as doubles,
/// so anything above this cannot round-trip exactly.
pub const MAX_SAFE_COMPONENT: u64 = 9_007_199_254_740_991;

/// Parses a version string, tolerating surrounding whitespace and a leading `v`.
///
/// Numeric components and numeric pre-release identifiers must not exceed
/// [`MAX_SAFE_COMPONENT`].
///
/// # Example
/// ```
/// use auto_commit_and_version::version::parse_version;
///
/// assert_eq!(parse_version("v1.2.3").unwrap().to_string(), "1.2.3");
/// assert!(parse_version("1.2").is_err());
/// assert!(parse_version("9007199254740993.0.0").is_err());
/// ```
pub fn parse_version(raw: &str) -> Result<Version> {
    let trimmed = raw.trim();
    let clean = trimmed.strip_prefix('v').unwrap_or(trimmed);

    let version = Version::parse(clean).map_err(|_| AutoCommitError::invalid_version(raw))?;

    let core_in_range = [version.major, version.minor, version.patch]
        .iter()
        .all(|n| *n <= MAX_SAFE_COMPONENT);
    let pre_in_range = version
        .pre
        .as_str()
        .split('.')
        .filter(|id| is_numeric(id))
        .all(|id| id.parse::<u64>().map_or(false, |n| n <= MAX_SAFE_COMPONENT));

    if !(core_in_range && pre_in_range) {
        return Err(AutoCommitError::invalid_version(raw));
    }

    Ok(version)
}

fn is_numeric(identifier: &str) -> bool {
    !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit())
}

/// Adds one to a component, failing past [`MAX_SAFE_COMPONENT`].
fn step(n: u64, version: &Version) -> Result<u64> {
    n.checked_add(1)
        .filter(|next| *next <= MAX_SAFE_COMPONENT)
        .ok_or_else(|| AutoCommitError::invalid_version(version.to_string()))
}

/// Computes the successor of `version` for the given release type.
///
/// - **major**: `1.2.3 -> 2.0.0`, but `2.0.0-rc.1 -> 2.0.0`
/// - **minor**: `1.2.3 -> 1.3.0`, but `1.3.0-rc.1 -> 1.3.0`
/// - **patch**: `1.2.3 -> 1.2.4`, but `1.2.4-rc.1 -> 1.2.4`
/// - **premajor / preminor / prepatch**: bump, then start pre-release `0`
/// - **prerelease**: `1.2.3 -> 1.2.4-0`, `1.2.4-rc.1 -> 1.2.4-rc.2`,
///   `1.2.4-rc -> 1.2.4-rc.0`
///
/// Build metadata never carries over. A component that would pass
/// [`MAX_SAFE_COMPONENT`] yields [`AutoCommitError::InvalidVersion`].
pub fn increment(version: &Version, release: ReleaseType) -> Result<Version> {
    let mut next = version.clone();
    next.build = BuildMetadata::EMPTY;

    match release {
        ReleaseType::Major => {
            if next.minor != 0 || next.patch != 0 || next.pre.is_empty() {
                next.major = step(next.major, version)?;
            }
            next.minor = 0;
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        ReleaseType::Minor => {
            if next.patch != 0 || next.pre.is_empty() {
                next.minor = step(next.minor, version)?;
            }
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        ReleaseType::Patch => {
            if next.pre.is_empty() {
                next.patch = step(next.patch, version)?;
            }
            next.pre = Prerelease::EMPTY;
        }
        ReleaseType::Premajor => {
            next.major = step(next.major, version)?;
            next.minor = 0;
            next.patch = 0;
            next.pre = start_prerelease();
        }
        ReleaseType::Preminor => {
            next.minor = step(next.minor, version)?;
            next.patch = 0;
            next.pre = start_prerelease();
        }
        ReleaseType::Prepatch => {
            next.patch = step(next.patch, version)?;
            next.pre = start_prerelease();
        }
        ReleaseType::Prerelease => {
            if next.pre.is_empty() {
                next.patch = step(next.patch, version)?;
                next.pre = start_prerelease();
            } else {
                next.pre = bump_prerelease(version)?;
            }
        }
    }

    Ok(next)
}

fn start_prerelease() -> Prerelease {
    Prerelease::new("0").unwrap_or(Prerelease::EMPTY)
}

/// Increments the right-most numeric pre-release identifier, or appends `.0`.
fn bump_prerelease(version: &Version) -> Result<Prerelease> {
    let invalid = || AutoCommitError::invalid_version(version.to_string());
    let mut identifiers: Vec<String> = version
        .pre
        .as_str()
        .split('.')
        .map(str::to_string)
        .collect();

    match identifiers.iter().rposition(|id| is_numeric(id)) {
        Some(i) => {
            let n = identifiers[i].parse::<u64>().map_err(|_| invalid())?;
            identifiers[i] = step(n, version)?.to_string();
        }
        None => identifiers.push("0".to_string()),
    }

    Prerelease::new(&identifiers.join(".")).map_err(|_| invalid())
}

/// Parses `raw`, resolves `release_type` and returns the next version.
pub fn next_version(raw: &str, release_type: &str) -> Result<Version> {
    let current = parse_version(raw)?;
    let release: ReleaseType = release_type.parse()?;
    increment(&current, release)
}
