use serde::Deserialize;
use std::fmt;
use std::fs;

use crate::error::{AutoCommitError, Result};
use crate::flag::is_enabled;

pub const DEFAULT_COMMIT_MESSAGE: &str = "Automated commit by `auto-commit-and-version` action";
pub const DEFAULT_RELEASE_TYPE: &str = "patch";
pub const DEFAULT_CONFIG_JSON: &str = "package.json";
pub const DEFAULT_EXCLUDE_FILES: &str = ":!*.lock :!*.lockfile :!*.lock[A-Za-z0-9] :!*[.-]lock.* :!*.snapshot :!*.resolved :!*go.sum";
pub const DEFAULT_CLEAN_EXCLUDED_FILES: &str = "yes";

pub const ENV_COMMIT_MESSAGE: &str = "COMMIT_MESSAGE";
pub const ENV_RELEASE_TYPE: &str = "RELEASE_TYPE";
pub const ENV_CONFIG_JSON: &str = "CONFIG_JSON";
pub const ENV_EXCLUDE_FILES: &str = "EXCLUDE_FILES";
pub const ENV_CLEAN_EXCLUDED_FILES: &str = "CLEAN_EXCLUDED_FILES";

/// Resolved inputs for one run.
///
/// Every field is kept as the raw string the user supplied (or its default);
/// on/off decisions go through [`is_enabled`] at the point of use.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub commit_message: String,
    pub release_type: String,
    pub config_json: String,
    pub exclude_files: String,
    pub clean_excluded_files: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            release_type: DEFAULT_RELEASE_TYPE.to_string(),
            config_json: DEFAULT_CONFIG_JSON.to_string(),
            exclude_files: DEFAULT_EXCLUDE_FILES.to_string(),
            clean_excluded_files: DEFAULT_CLEAN_EXCLUDED_FILES.to_string(),
        }
    }
}

/// A scalar from the TOML file. Booleans and integers are accepted so that
/// `clean_excluded_files = false` reads naturally.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputValue::Bool(b) => write!(f, "{}", b),
            InputValue::Integer(i) => write!(f, "{}", i),
            InputValue::Text(s) => f.write_str(s),
        }
    }
}

/// Optional TOML configuration file. Keys mirror the [`Config`] fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub commit_message: Option<InputValue>,
    #[serde(default)]
    pub release_type: Option<InputValue>,
    #[serde(default)]
    pub config_json: Option<InputValue>,
    #[serde(default)]
    pub exclude_files: Option<InputValue>,
    #[serde(default)]
    pub clean_excluded_files: Option<InputValue>,
}

/// Values given directly on the command line; they win over every other layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub commit_message: Option<String>,
    pub release_type: Option<String>,
    pub config_json: Option<String>,
    pub exclude_files: Option<String>,
    pub clean_excluded_files: Option<String>,
}

/// Loads and parses a TOML configuration file.
///
/// # Returns
/// * `Ok(ConfigFile)` - Parsed file; absent keys stay `None`
/// * `Err` - If the file cannot be read or is not valid TOML
pub fn load_config_file(path: &str) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| AutoCommitError::config(format!("Cannot parse '{}': {}", path, e)))
}

/// Picks the highest-precedence layer that carries a non-empty value.
fn pick(layers: [Option<String>; 3], default: &str) -> String {
    layers
        .into_iter()
        .rev()
        .flatten()
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl Config {
    /// Resolves the configuration from the process environment alone.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve(&ConfigFile::default(), lookup, &Overrides::default())
    }

    /// Layers defaults, file, environment and command-line overrides.
    ///
    /// Empty values are treated as absent at every layer, so the next lower
    /// layer (ultimately the default) applies.
    pub fn resolve<F>(file: &ConfigFile, lookup: F, overrides: &Overrides) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_file = |value: &Option<InputValue>| value.as_ref().map(|v| v.to_string());

        Config {
            commit_message: pick(
                [
                    from_file(&file.commit_message),
                    lookup(ENV_COMMIT_MESSAGE),
                    overrides.commit_message.clone(),
                ],
                DEFAULT_COMMIT_MESSAGE,
            ),
            release_type: pick(
                [
                    from_file(&file.release_type),
                    lookup(ENV_RELEASE_TYPE),
                    overrides.release_type.clone(),
                ],
                DEFAULT_RELEASE_TYPE,
            ),
            config_json: pick(
                [
                    from_file(&file.config_json),
                    lookup(ENV_CONFIG_JSON),
                    overrides.config_json.clone(),
                ],
                DEFAULT_CONFIG_JSON,
            ),
            exclude_files: pick(
                [
                    from_file(&file.exclude_files),
                    lookup(ENV_EXCLUDE_FILES),
                    overrides.exclude_files.clone(),
                ],
                DEFAULT_EXCLUDE_FILES,
            ),
            clean_excluded_files: pick(
                [
                    from_file(&file.clean_excluded_files),
                    lookup(ENV_CLEAN_EXCLUDED_FILES),
                    overrides.clean_excluded_files.clone(),
                ],
                DEFAULT_CLEAN_EXCLUDED_FILES,
            ),
        }
    }

    /// Version bumping needs both a release type and a target file.
    pub fn bump_enabled(&self) -> bool {
        is_enabled(&self.release_type) && is_enabled(&self.config_json)
    }

    /// Exclusion pathspecs for the status query, or `None` when disabled.
    pub fn exclusions(&self) -> Option<Vec<String>> {
        if !is_enabled(&self.exclude_files) {
            return None;
        }

        Some(
            self.exclude_files
                .split(' ')
                .filter(|pattern| !pattern.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn cleanup_enabled(&self) -> bool {
        is_enabled(&self.clean_excluded_files)
    }

    /// Renders the commit message, replacing the first `{version}` token.
    pub fn render_commit_message(&self, version: Option<&str>) -> String {
        self.commit_message
            .replacen("{version}", version.unwrap_or("unknown"), 1)
    }
}
