use crate::core::command::ToolCommand;
use crate::models::{ExecutionResult, Report};

/// Builds the report for a tool that ran to completion.
/// Line order: outcome, command line, stdout section, stderr section.
/// Empty output streams get no section.
pub fn from_execution(command: &ToolCommand, output_folder: &str, result: &ExecutionResult) -> Report {
    let success = result.succeeded();
    let headline = if success {
        format!(
            "[{}] Download completed. Check the '{}' folder.",
            command.tool, output_folder
        )
    } else {
        format!(
            "[{}] Download failed (exit code {}).",
            command.tool, result.exit_code
        )
    };

    let mut lines = vec![headline, format!("Command: {}", command)];
    push_section(&mut lines, "stdout", &result.stdout);
    push_section(&mut lines, "stderr", &result.stderr);

    Report { success, lines }
}

/// Collapses an error that prevented the tool from running into a
/// single-line failure report.
pub fn from_error(err: &dyn std::error::Error) -> Report {
    Report {
        success: false,
        lines: vec![format!("Unexpected error: {}", err)],
    }
}

fn push_section(lines: &mut Vec<String>, label: &str, text: &str) {
    if text.is_empty() {
        return;
    }
    lines.push(format!("--- {} ---", label));
    lines.push(text.trim_end_matches(['\r', '\n']).to_string());
}
