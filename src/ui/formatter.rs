//! Pure formatting functions for runner output.
//!
//! Builds workflow-command lines and output-file records. Nothing here
//! performs I/O, so every function is unit-testable.

/// Escapes the message part of a workflow command.
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escapes a property value of a workflow command.
pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

/// Formats a workflow command such as `::error::message`.
///
/// # Example
/// ```
/// use auto_commit_and_version::ui::formatter::workflow_command;
///
/// assert_eq!(workflow_command("warning", &[], "careful"), "::warning::careful");
/// assert_eq!(
///     workflow_command("set-output", &[("name", "changes-made")], "true"),
///     "::set-output name=changes-made::true"
/// );
/// ```
pub fn workflow_command(command: &str, properties: &[(&str, &str)], message: &str) -> String {
    let mut line = format!("::{}", command);

    if !properties.is_empty() {
        let rendered: Vec<String> = properties
            .iter()
            .map(|(key, value)| format!("{}={}", key, escape_property(value)))
            .collect();
        line.push(' ');
        line.push_str(&rendered.join(","));
    }

    line.push_str("::");
    line.push_str(&escape_data(message));
    line
}

/// Formats one record for the file named by `GITHUB_OUTPUT`.
///
/// Single-line values use `name=value`; values containing a newline use a
/// heredoc block closed by `delimiter`.
pub fn output_record(name: &str, value: &str, delimiter: &str) -> String {
    if value.contains('\n') || value.contains('\r') {
        format!("{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter)
    } else {
        format!("{}={}\n", name, value)
    }
}

/// Renders a command line the way the runner log shows executed tools.
pub fn command_line(program: &str, args: &[String]) -> String {
    let mut line = format!("[command]{}", program);
    for arg in args {
        line.push(' ');
        if arg.is_empty() || arg.contains(char::is_whitespace) {
            line.push('"');
            line.push_str(arg);
            line.push('"');
        } else {
            line.push_str(arg);
        }
    }
    line
}
