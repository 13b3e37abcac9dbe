use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;

use auto_commit_and_version::cli::{run_workflow, WorkflowOutcome, CHANGES_MADE_OUTPUT};
use auto_commit_and_version::config::{load_config_file, Config, ConfigFile, Overrides};
use auto_commit_and_version::git::GitCli;
use auto_commit_and_version::ui;

#[derive(clap::Parser)]
#[command(
    name = "auto-commit-and-version",
    version,
    about = "Commit and push working tree changes, bumping the version in a JSON file"
)]
struct Args {
    #[arg(short, long, help = "TOML file with default inputs")]
    config: Option<String>,

    #[arg(
        short = 'C',
        long,
        default_value = ".",
        help = "Run as if started in this directory"
    )]
    directory: PathBuf,

    #[arg(long, help = "Commit message template; {version} is replaced")]
    commit_message: Option<String>,

    #[arg(long, help = "Release type: major, minor, patch, pre*, or a falsy value to skip")]
    release_type: Option<String>,

    #[arg(long, help = "JSON file holding the version, or a falsy value to skip")]
    config_json: Option<String>,

    #[arg(long, help = "Space-separated exclusion pathspecs for the status check")]
    exclude_files: Option<String>,

    #[arg(long, help = "Discard excluded and untracked files when nothing is committed")]
    clean_excluded_files: Option<String>,
}

fn resolve_config(args: &Args) -> Result<Config> {
    let file = match args.config.as_deref() {
        Some(path) => load_config_file(path)?,
        None => ConfigFile::default(),
    };

    let overrides = Overrides {
        commit_message: args.commit_message.clone(),
        release_type: args.release_type.clone(),
        config_json: args.config_json.clone(),
        exclude_files: args.exclude_files.clone(),
        clean_excluded_files: args.clean_excluded_files.clone(),
    };

    Ok(Config::resolve(
        &file,
        |key| std::env::var(key).ok(),
        &overrides,
    ))
}

fn execute(args: &Args) -> Result<WorkflowOutcome> {
    let config = resolve_config(args)?;

    let repo = GitCli::open(&args.directory).map_err(|e| {
        anyhow!(
            "Cannot open repository at '{}': {}",
            args.directory.display(),
            e
        )
    })?;
    if let Some(branch) = repo.branch() {
        ui::display_status(&format!("On branch {}", branch));
    }

    let outcome = run_workflow(&repo, &config, &args.directory)?;
    ui::set_output(CHANGES_MADE_OUTPUT, outcome.changes_made())?;

    Ok(outcome)
}

fn main() {
    let args = Args::parse();

    if let Err(e) = execute(&args) {
        ui::set_failed(&e.to_string());
        std::process::exit(1);
    }
}
