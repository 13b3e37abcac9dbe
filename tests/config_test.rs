// tests/config_test.rs
use auto_commit_and_version::config::{
    load_config_file, Config, ConfigFile, InputValue, Overrides, DEFAULT_EXCLUDE_FILES,
    ENV_CLEAN_EXCLUDED_FILES, ENV_COMMIT_MESSAGE, ENV_CONFIG_JSON, ENV_EXCLUDE_FILES,
    ENV_RELEASE_TYPE,
};
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

const ALL_VARS: [&str; 5] = [
    ENV_COMMIT_MESSAGE,
    ENV_RELEASE_TYPE,
    ENV_CONFIG_JSON,
    ENV_EXCLUDE_FILES,
    ENV_CLEAN_EXCLUDED_FILES,
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_load_from_file() {
    let file = load_config_file("tests/fixtures/autocommit.toml").expect("Failed to load fixture");
    assert_eq!(
        file.commit_message,
        Some(InputValue::Text("chore(release): v{version}".to_string()))
    );
    assert_eq!(file.clean_excluded_files, Some(InputValue::Bool(false)));
    assert_eq!(file.exclude_files, None);

    let config = Config::resolve(&file, |_| None, &Overrides::default());
    assert_eq!(config.release_type, "minor");
    assert_eq!(config.config_json, "app/manifest.json");
    assert_eq!(config.exclude_files, DEFAULT_EXCLUDE_FILES);
    assert!(!config.cleanup_enabled());
    assert_eq!(
        config.render_commit_message(Some("1.3.0")),
        "chore(release): v1.3.0"
    );
}

#[test]
fn test_load_file_with_unknown_key_fails() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"release_typ = \"minor\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    let err = load_config_file(temp_file.path().to_str().unwrap()).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_load_missing_file_fails() {
    let err = load_config_file("tests/fixtures/does-not-exist.toml").unwrap_err();
    assert!(err.to_string().contains("I/O error"));
}

#[test]
fn test_integer_values_in_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"clean_excluded_files = 0\n").unwrap();
    temp_file.flush().unwrap();

    let file = load_config_file(temp_file.path().to_str().unwrap()).unwrap();
    let config = Config::resolve(&file, |_| None, &Overrides::default());
    assert_eq!(config.clean_excluded_files, "0");
    assert!(!config.cleanup_enabled());
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();
    let config = Config::from_env();
    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn test_from_env_reads_every_variable() {
    clear_env();
    env::set_var(ENV_COMMIT_MESSAGE, "release {version}");
    env::set_var(ENV_RELEASE_TYPE, "major");
    env::set_var(ENV_CONFIG_JSON, "manifest.json");
    env::set_var(ENV_EXCLUDE_FILES, "off");
    env::set_var(ENV_CLEAN_EXCLUDED_FILES, "no");

    let config = Config::from_env();
    clear_env();

    assert_eq!(config.commit_message, "release {version}");
    assert_eq!(config.release_type, "major");
    assert_eq!(config.config_json, "manifest.json");
    assert_eq!(config.exclusions(), None);
    assert!(!config.cleanup_enabled());
    assert!(config.bump_enabled());
}

#[test]
#[serial]
fn test_env_overrides_file_and_empty_env_does_not() {
    clear_env();
    env::set_var(ENV_RELEASE_TYPE, "prepatch");
    env::set_var(ENV_CONFIG_JSON, "");

    let file = ConfigFile {
        release_type: Some(InputValue::Text("minor".to_string())),
        config_json: Some(InputValue::Text("app.json".to_string())),
        ..Default::default()
    };
    let config = Config::resolve(&file, |key| env::var(key).ok(), &Overrides::default());
    clear_env();

    assert_eq!(config.release_type, "prepatch");
    assert_eq!(config.config_json, "app.json");
}
