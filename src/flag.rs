//! Interpretation of loosely-typed on/off inputs.
//!
//! Action inputs arrive as strings. Anything outside a small negative
//! vocabulary counts as "enabled", so `yes`, `true`, `1` and arbitrary text
//! all turn a feature on.

use std::fmt::Display;

/// Values that switch a flag off, compared after trimming and lowercasing.
pub const FALSY_VALUES: [&str; 7] = ["", "undefined", "null", "false", "0", "no", "off"];

/// Returns `true` unless the value's string form is one of [`FALSY_VALUES`].
///
/// # Example
/// ```
/// use auto_commit_and_version::flag::is_enabled;
///
/// assert!(is_enabled("yes"));
/// assert!(is_enabled("patch"));
/// assert!(!is_enabled("  OFF "));
/// assert!(!is_enabled(false));
/// assert!(!is_enabled(0));
/// ```
pub fn is_enabled(value: impl Display) -> bool {
    let normalized = value.to_string().trim().to_lowercase();
    !FALSY_VALUES.contains(&normalized.as_str())
}
