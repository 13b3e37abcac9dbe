//! Runs the workflow against real repositories driven by the `git` binary.

use auto_commit_and_version::cli::{run_workflow, WorkflowOutcome};
use auto_commit_and_version::config::Config;
use auto_commit_and_version::git::{GitCli, Repository};
use auto_commit_and_version::AutoCommitError;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

// =================================
// ===== Helper Functions
// =================================

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to execute git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A working repository with one pushed commit and a bare `origin`.
struct Fixture {
    _root: TempDir,
    remote: std::path::PathBuf,
    work: std::path::PathBuf,
}

fn setup() -> Fixture {
    let root = TempDir::new().unwrap();
    let remote = root.path().join("remote.git");
    let work = root.path().join("work");
    fs::create_dir_all(&remote).unwrap();
    fs::create_dir_all(&work).unwrap();

    git(&remote, &["init", "--bare"]);
    git(&work, &["init"]);
    git(&work, &["config", "user.name", "Test User"]);
    git(&work, &["config", "user.email", "test@example.com"]);
    git(&work, &["config", "commit.gpgsign", "false"]);

    fs::write(
        work.join("package.json"),
        "{\n    \"name\": \"fixture\",\n    \"version\": \"1.2.3\"\n}\n",
    )
    .unwrap();
    fs::write(work.join("yarn.lock"), "lock v1\n").unwrap();
    fs::write(work.join("index.js"), "console.log(1)\n").unwrap();
    git(&work, &["add", "."]);
    git(&work, &["commit", "-m", "Initial commit"]);
    git(&work, &["remote", "add", "origin", remote.to_str().unwrap()]);
    git(&work, &["push", "-u", "origin", "HEAD"]);

    Fixture {
        _root: root,
        remote,
        work,
    }
}

fn head_subject(dir: &Path) -> String {
    git(dir, &["log", "-1", "--format=%s"])
}

fn remote_subject(remote: &Path) -> String {
    git(remote, &["log", "-1", "--format=%s", "--branches"])
}

// =================================
// ===== Status Tests
// =================================

#[test]
fn test_status_respects_exclusions() {
    let fx = setup();
    fs::write(fx.work.join("yarn.lock"), "lock v2\n").unwrap();
    let repo = GitCli::open(&fx.work).unwrap();

    let excluded = vec![":!*.lock".to_string()];
    assert!(repo.status(Some(&excluded)).unwrap().trim().is_empty());
    assert!(repo.status(None).unwrap().contains("yarn.lock"));
}

#[test]
fn test_status_with_exclusions_ignores_untracked() {
    let fx = setup();
    fs::write(fx.work.join("scratch.txt"), "tmp").unwrap();
    let repo = GitCli::open(&fx.work).unwrap();

    let excluded = vec![":!*.lock".to_string()];
    assert!(repo.status(Some(&excluded)).unwrap().trim().is_empty());
    assert!(repo.status(None).unwrap().contains("scratch.txt"));
}

#[test]
fn test_open_reports_branch() {
    let fx = setup();
    let repo = GitCli::open(&fx.work).unwrap();
    let expected = git(&fx.work, &["rev-parse", "--abbrev-ref", "HEAD"]);
    assert_eq!(repo.branch(), Some(expected.as_str()));
}

#[test]
fn test_failed_command_reports_exit_code() {
    let fx = setup();
    let repo = GitCli::open(&fx.work).unwrap();
    let err = repo.commit("nothing staged").unwrap_err();
    assert!(err.to_string().contains("git commit -m nothing staged"));
    assert!(matches!(err, AutoCommitError::Command { code: 1, .. }));
}

// =================================
// ===== Workflow Tests
// =================================

#[test]
fn test_workflow_commits_bumps_and_pushes() {
    let fx = setup();
    fs::write(fx.work.join("index.js"), "console.log(2)\n").unwrap();
    let repo = GitCli::open(&fx.work).unwrap();
    let config = Config {
        commit_message: "chore: release {version}".to_string(),
        ..Config::default()
    };

    let outcome = run_workflow(&repo, &config, &fx.work).unwrap();

    assert_eq!(outcome.changes_made(), "true");
    assert_eq!(head_subject(&fx.work), "chore: release 1.2.4");
    assert_eq!(remote_subject(&fx.remote), "chore: release 1.2.4");
    assert_eq!(
        fs::read_to_string(fx.work.join("package.json")).unwrap(),
        "{\n    \"name\": \"fixture\",\n    \"version\": \"1.2.4\"\n}\n"
    );
    assert_eq!(git(&fx.work, &["config", "user.name"]), "github-actions");
    assert!(git(&fx.work, &["status", "--porcelain"]).is_empty());
}

#[test]
fn test_workflow_without_bump_uses_unknown() {
    let fx = setup();
    fs::write(fx.work.join("index.js"), "console.log(3)\n").unwrap();
    let repo = GitCli::open(&fx.work).unwrap();
    let config = Config {
        commit_message: "update {version}".to_string(),
        release_type: "no".to_string(),
        ..Config::default()
    };

    run_workflow(&repo, &config, &fx.work).unwrap();

    assert_eq!(remote_subject(&fx.remote), "update unknown");
    assert!(fs::read_to_string(fx.work.join("package.json"))
        .unwrap()
        .contains("\"1.2.3\""));
}

#[test]
fn test_clean_path_with_cleanup_restores_tree() {
    let fx = setup();
    let before = head_subject(&fx.work);
    fs::write(fx.work.join("yarn.lock"), "lock v2\n").unwrap();
    fs::write(fx.work.join("scratch.txt"), "tmp").unwrap();
    fs::create_dir_all(fx.work.join("build")).unwrap();
    fs::write(fx.work.join("build/out.js"), "x").unwrap();
    let repo = GitCli::open(&fx.work).unwrap();

    let outcome = run_workflow(&repo, &Config::default(), &fx.work).unwrap();

    assert_eq!(outcome, WorkflowOutcome::Clean { cleaned: true });
    assert_eq!(outcome.changes_made(), "");
    assert_eq!(
        fs::read_to_string(fx.work.join("yarn.lock")).unwrap(),
        "lock v1\n"
    );
    assert!(!fx.work.join("scratch.txt").exists());
    assert!(!fx.work.join("build").exists());
    assert!(git(&fx.work, &["status", "--porcelain"]).is_empty());
    assert_eq!(head_subject(&fx.work), before);
}

#[test]
fn test_clean_path_without_cleanup_leaves_files() {
    let fx = setup();
    fs::write(fx.work.join("yarn.lock"), "lock v2\n").unwrap();
    fs::write(fx.work.join("scratch.txt"), "tmp").unwrap();
    let repo = GitCli::open(&fx.work).unwrap();
    let config = Config {
        clean_excluded_files: "no".to_string(),
        ..Config::default()
    };

    let outcome = run_workflow(&repo, &config, &fx.work).unwrap();

    assert_eq!(outcome, WorkflowOutcome::Clean { cleaned: false });
    assert_eq!(
        fs::read_to_string(fx.work.join("yarn.lock")).unwrap(),
        "lock v2\n"
    );
    assert!(fx.work.join("scratch.txt").exists());
}

#[test]
fn test_clean_path_is_idempotent() {
    let fx = setup();
    fs::write(fx.work.join("yarn.lock"), "lock v2\n").unwrap();
    let repo = GitCli::open(&fx.work).unwrap();

    let first = run_workflow(&repo, &Config::default(), &fx.work).unwrap();
    let head_after_first = git(&fx.work, &["rev-parse", "HEAD"]);
    let status_after_first = git(&fx.work, &["status", "--porcelain", "--ignored"]);

    let second = run_workflow(&repo, &Config::default(), &fx.work).unwrap();

    assert_eq!(first, second);
    assert_eq!(git(&fx.work, &["rev-parse", "HEAD"]), head_after_first);
    assert_eq!(
        git(&fx.work, &["status", "--porcelain", "--ignored"]),
        status_after_first
    );
}

#[test]
fn test_invalid_version_leaves_repository_untouched() {
    let fx = setup();
    fs::write(
        fx.work.join("package.json"),
        "{\n    \"version\": \"not-a-version\"\n}\n",
    )
    .unwrap();
    let before = git(&fx.work, &["rev-parse", "HEAD"]);
    let repo = GitCli::open(&fx.work).unwrap();

    let err = run_workflow(&repo, &Config::default(), &fx.work).unwrap_err();

    assert_eq!(err.to_string(), "Invalid semantic version: not-a-version");
    assert_eq!(git(&fx.work, &["rev-parse", "HEAD"]), before);
    assert_eq!(remote_subject(&fx.remote), "Initial commit");
}
