//! Runner-facing output: status lines, workflow commands and step outputs.
//!
//! Separates concerns:
//! - `formatter` - Pure string builders
//! - This module - Writing them to stdout/stderr or the output file

use console::style;
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::boundary::BoundaryWarning;
use crate::error::Result;

pub mod formatter;

pub use formatter::{command_line, escape_data, output_record, workflow_command};

/// Environment variable naming the file that collects step outputs.
pub const GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Echoes an external command before it runs.
pub fn display_command(program: &str, args: &[String]) {
    println!("{}", style(command_line(program, args)).cyan());
}

/// Relays captured tool output to the log, skipping blank captures.
pub fn relay_output(stdout: &str, stderr: &str) {
    if !stdout.trim().is_empty() {
        print!("{}", stdout);
        if !stdout.ends_with('\n') {
            println!();
        }
    }
    if !stderr.trim().is_empty() {
        eprint!("{}", stderr);
        if !stderr.ends_with('\n') {
            eprintln!();
        }
    }
}

/// Emits a `::debug::` line; only shown when step debug logging is on.
pub fn debug(message: &str) {
    println!("{}", workflow_command("debug", &[], message));
}

/// Emits a `::warning::` annotation.
pub fn warning(message: &str) {
    println!("{}", workflow_command("warning", &[], message));
}

pub fn display_boundary_warning(warning: &BoundaryWarning) {
    self::warning(&warning.to_string());
}

/// Reports the step as failed. The caller decides the exit status.
pub fn set_failed(message: &str) {
    println!("{}", workflow_command("error", &[], message));
    display_error(message);
}

/// Appends a step output to `file`.
pub fn write_output(file: &Path, name: &str, value: &str) -> Result<()> {
    let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
    let mut handle = OpenOptions::new().create(true).append(true).open(file)?;
    handle.write_all(output_record(name, value, &delimiter).as_bytes())?;
    Ok(())
}

/// Sets a step output.
///
/// Writes to the file named by `GITHUB_OUTPUT` when the runner provides one,
/// otherwise falls back to the legacy `::set-output` command.
pub fn set_output(name: &str, value: &str) -> Result<()> {
    match env::var_os(GITHUB_OUTPUT) {
        Some(path) if !path.is_empty() => write_output(Path::new(&path), name, value),
        _ => {
            println!();
            println!("{}", workflow_command("set-output", &[("name", name)], value));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_write_output_appends_records() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("output");
        fs::write(&file, "earlier=1\n").unwrap();

        write_output(&file, "changes-made", "true").unwrap();
        write_output(&file, "changes-made", "").unwrap();

        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "earlier=1\nchanges-made=true\nchanges-made=\n"
        );
    }

    #[test]
    fn test_write_output_multiline_uses_delimiter() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("output");

        write_output(&file, "notes", "one\ntwo").unwrap();

        let content = fs::read_to_string(&file).unwrap();
        assert!(content.starts_with("notes<<ghadelimiter_"));
        assert!(content.contains("\none\ntwo\n"));
    }

    #[test]
    fn test_display_functions_do_not_panic() {
        display_status("status");
        display_success("success");
        display_error("error");
        debug("debug");
        warning("warning");
        relay_output("out", "err\n");
    }
}
