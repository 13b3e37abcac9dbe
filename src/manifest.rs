//! Reading, bumping and rewriting the `version` field of a JSON manifest.
//!
//! The rewritten document keeps the original key order and indentation
//! unit; only the version string changes.

use semver::Version;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use std::fs;
use std::path::Path;

use crate::error::{AutoCommitError, Result};
use crate::indent::{detect_indent, DEFAULT_INDENT};
use crate::version::{increment, parse_version, ReleaseType};

pub const VERSION_KEY: &str = "version";

/// Result of a successful bump.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpedVersion {
    pub previous: Version,
    pub next: Version,
    /// Indentation unit used when writing the document back
    pub indent: String,
    /// `false` when the document had no detectable indentation and the
    /// default unit was used
    pub indent_detected: bool,
}

/// A bumped document ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpedDocument {
    pub content: String,
    pub version: BumpedVersion,
}

/// Serializes `value` as pretty JSON using `indent` as the unit.
pub fn to_string_with_indent(value: &Value, indent: &str) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;

    // Never fails: serde_json writes UTF-8 and `indent` is a `&str`.
    String::from_utf8(buf)
        .map_err(|e| AutoCommitError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Bumps the version inside `content` without touching the filesystem.
///
/// `source` names the document in error messages.
pub fn bump_version_text(content: &str, release_type: &str, source: &str) -> Result<BumpedDocument> {
    if content.is_empty() {
        return Err(AutoCommitError::empty_content(source));
    }

    let mut document: Value = serde_json::from_str(content)?;

    let raw = match document.get(VERSION_KEY) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => {
            return Err(AutoCommitError::MissingVersion)
        }
        Some(Value::String(s)) if s.is_empty() => return Err(AutoCommitError::MissingVersion),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => {
            return Err(AutoCommitError::MissingVersion)
        }
        Some(Value::String(s)) => s.clone(),
        Some(other) => return Err(AutoCommitError::invalid_version(other.to_string())),
    };

    let previous = parse_version(&raw)?;
    let release: ReleaseType = release_type.parse()?;
    let next = increment(&previous, release)?;

    if let Some(slot) = document.get_mut(VERSION_KEY) {
        *slot = Value::String(next.to_string());
    }

    let detected = detect_indent(content);
    let indent_detected = detected.is_some();
    let indent = detected
        .map(|i| i.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_INDENT.to_string());

    let mut serialized = to_string_with_indent(&document, &indent)?;
    if content.ends_with('\n') {
        serialized.push('\n');
    }

    Ok(BumpedDocument {
        content: serialized,
        version: BumpedVersion {
            previous,
            next,
            indent,
            indent_detected,
        },
    })
}

/// Bumps the version field of the JSON file at `path` and rewrites it.
///
/// Nothing is written unless every step succeeds.
///
/// # Returns
/// * `Ok(BumpedVersion)` - Previous and new versions
/// * `Err` - Empty file, invalid JSON, missing or invalid version, unknown
///   release type, or an I/O failure
pub fn bump_version_file(path: &Path, release_type: &str) -> Result<BumpedVersion> {
    let content = fs::read_to_string(path)?;
    let bumped = bump_version_text(&content, release_type, &path.display().to_string())?;
    fs::write(path, &bumped.content)?;

    Ok(bumped.version)
}
