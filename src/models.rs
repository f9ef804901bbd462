use std::fmt;

use serde::Serialize;

/// Folder used when the caller leaves the output folder blank.
pub const DEFAULT_OUTPUT_FOLDER: &str = "downloads";

/// External programs the application knows how to drive or probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Spotdl,
    YtDlp,
    Ffmpeg,
}

impl Tool {
    pub fn label(self) -> &'static str {
        match self {
            Tool::Spotdl => "spotdl",
            Tool::YtDlp => "yt-dlp",
            Tool::Ffmpeg => "ffmpeg",
        }
    }

    /// Flag that makes the tool print its version and exit.
    pub fn version_flag(self) -> &'static str {
        match self {
            Tool::Ffmpeg => "-version",
            Tool::Spotdl | Tool::YtDlp => "--version",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub output_folder: String,
}

impl Request {
    pub fn new(url: &str, output_folder: &str) -> Self {
        let output_folder = if output_folder.trim().is_empty() {
            DEFAULT_OUTPUT_FOLDER.to_string()
        } else {
            output_folder.to_string()
        };
        Self {
            url: url.to_string(),
            output_folder,
        }
    }
}

/// Captured outcome of one external tool run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    /// `-1` when the process was terminated without an exit code.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionResult {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// Human-readable outcome of a download. The first line always says
/// whether the download succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub success: bool,
    pub lines: Vec<String>,
}

impl Report {
    pub fn headline(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or_default()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// Result of probing one external tool at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolStatus {
    pub tool: String,
    pub available: bool,
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_empty_folder_defaults() {
        assert_eq!(Request::new("u", "").output_folder, "downloads");
    }

    #[test]
    fn test_request_blank_folder_defaults() {
        assert_eq!(Request::new("u", "   ").output_folder, "downloads");
    }

    #[test]
    fn test_request_keeps_given_folder() {
        assert_eq!(Request::new("u", "music").output_folder, "music");
    }

    #[test]
    fn test_report_display_joins_lines() {
        let report = Report {
            success: true,
            lines: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(report.to_string(), "first\nsecond");
        assert_eq!(report.headline(), "first");
    }

    #[test]
    fn test_version_flags() {
        assert_eq!(Tool::Ffmpeg.version_flag(), "-version");
        assert_eq!(Tool::YtDlp.version_flag(), "--version");
    }
}
