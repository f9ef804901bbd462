//! Startup check for the external tools.
//!
//! Each tool is asked for its version; the first line of whatever it prints
//! becomes the detail shown to the user.

use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::config::ToolsConfig;
use crate::error::DispatchError;
use crate::models::{Tool, ToolStatus};

/// Tools probed at startup, in display order.
pub const PROBED_TOOLS: [Tool; 3] = [Tool::YtDlp, Tool::Spotdl, Tool::Ffmpeg];

pub fn check_tools(tools: &ToolsConfig) -> Vec<ToolStatus> {
    PROBED_TOOLS
        .iter()
        .map(|&tool| check_tool(tool, tools.program(tool)))
        .collect()
}

pub fn check_tool(tool: Tool, program: &str) -> ToolStatus {
    let status = match Command::new(program)
        .arg(tool.version_flag())
        .stdin(Stdio::null())
        .output()
    {
        Ok(output) if output.status.success() => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            // some tools print their version on stderr
            let text = if stdout.trim().is_empty() { stderr } else { stdout };
            ToolStatus {
                tool: tool.label().to_string(),
                available: true,
                detail: first_line(&text).unwrap_or("version unknown").to_string(),
            }
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = match first_line(&stderr) {
                Some(line) => format!("'{}' exited with {}: {}", program, output.status, line),
                None => format!("'{}' exited with {}", program, output.status),
            };
            ToolStatus {
                tool: tool.label().to_string(),
                available: false,
                detail,
            }
        }
        Err(e) => ToolStatus {
            tool: tool.label().to_string(),
            available: false,
            detail: DispatchError::from_spawn(program, e).to_string(),
        },
    };

    if status.available {
        debug!(tool = %status.tool, version = %status.detail, "tool available");
    } else {
        warn!(tool = %status.tool, "tool unavailable: {}", status.detail);
    }
    status
}

pub fn all_available(statuses: &[ToolStatus]) -> bool {
    statuses.iter().all(|s| s.available)
}

fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|l| !l.is_empty())
}
