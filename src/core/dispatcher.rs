use std::path::Path;

use tracing::{info, warn};

use crate::config::ToolsConfig;
use crate::core::command::build_command;
use crate::core::report;
use crate::core::router::route;
use crate::core::runner::{CommandRunner, SystemRunner};
use crate::error::DispatchError;
use crate::models::{Report, Request};

/// Picks the downloader for a URL, runs it and reports the outcome.
///
/// Holds no mutable state, so one instance can serve concurrent callers.
/// The output folder is the only shared resource and it is only ever
/// created, never written, from here.
pub struct Dispatcher<R = SystemRunner> {
    tools: ToolsConfig,
    runner: R,
}

impl Dispatcher {
    pub fn new(tools: ToolsConfig) -> Self {
        Self::with_runner(tools, SystemRunner)
    }
}

impl<R: CommandRunner> Dispatcher<R> {
    pub fn with_runner(tools: ToolsConfig, runner: R) -> Self {
        Self { tools, runner }
    }

    /// Downloads `url` into `output_folder` (`"downloads"` when blank).
    /// Never fails: every problem ends up in the returned report.
    pub fn download(&self, url: &str, output_folder: &str) -> Report {
        self.download_with_progress(url, output_folder, |_, _| {})
    }

    /// Like [`Dispatcher::download`], reporting coarse milestones to
    /// `on_progress` as `(fraction, message)`. Purely advisory.
    pub fn download_with_progress<F>(&self, url: &str, output_folder: &str, mut on_progress: F) -> Report
    where
        F: FnMut(f32, &str),
    {
        on_progress(0.0, "Starting");
        let request = Request::new(url, output_folder);

        match self.execute(&request, &mut on_progress) {
            Ok(report) => report,
            Err(e) => {
                warn!(url = %request.url, "download aborted: {}", e);
                on_progress(1.0, "Error occurred");
                report::from_error(&e)
            }
        }
    }

    fn execute<F>(&self, request: &Request, on_progress: &mut F) -> Result<Report, DispatchError>
    where
        F: FnMut(f32, &str),
    {
        let folder = Path::new(&request.output_folder);
        std::fs::create_dir_all(folder).map_err(|source| DispatchError::CreateFolder {
            path: folder.to_path_buf(),
            source,
        })?;

        let tool = route(&request.url);
        on_progress(0.1, &format!("[{}] URL detected, preparing download...", tool));

        let command = build_command(&self.tools, tool, &request.url, folder);
        info!(%tool, url = %request.url, folder = %request.output_folder, "dispatching download");
        on_progress(0.3, &format!("[{}] Running download...", tool));

        let result = self.runner.run(&command)?;
        on_progress(1.0, &format!("[{}] Finished.", tool));

        if result.succeeded() {
            info!(%tool, "download completed");
        } else {
            warn!(%tool, exit_code = result.exit_code, "download failed");
        }
        Ok(report::from_execution(&command, &request.output_folder, &result))
    }
}


#[cfg(all(test, unix))]
mod process_tests {
    use super::*;
    use serial_test::serial;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    /// Writes an executable shell script standing in for a downloader.
    fn stub_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn tools_with_ytdlp(program: &Path) -> ToolsConfig {
        ToolsConfig {
            yt_dlp: program.to_string_lossy().into_owned(),
            ..Default::default()
        }
    }

    #[test]
    #[serial]
    fn test_stub_tool_success() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = stub_tool(tmp.path(), "fake-ytdlp", "echo OK\nexit 0");
        let dispatcher = Dispatcher::new(tools_with_ytdlp(&tool));

        let out = tmp.path().join("out");
        let report = dispatcher.download("https://youtu.be/a", &out.to_string_lossy());
        assert!(report.success, "{}", report);
        assert!(report.to_string().contains("OK"));
        assert!(out.is_dir());
    }

    #[test]
    #[serial]
    fn test_stub_tool_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = stub_tool(tmp.path(), "fake-ytdlp", "echo boom >&2\nexit 1");
        let dispatcher = Dispatcher::new(tools_with_ytdlp(&tool));

        let out = tmp.path().join("out");
        let report = dispatcher.download("https://youtu.be/a", &out.to_string_lossy());
        assert!(!report.success);
        assert!(report.headline().contains("exit code 1"));
        assert!(report.to_string().contains("boom"));
    }

    #[test]
    #[serial]
    fn test_stub_tool_receives_arguments() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = stub_tool(tmp.path(), "fake-spotdl", "printf '%s\\n' \"$@\"");
        let tools = ToolsConfig {
            spotdl: tool.to_string_lossy().into_owned(),
            ..Default::default()
        };
        let dispatcher = Dispatcher::new(tools);

        let out = tmp.path().join("out");
        let report = dispatcher.download("https://open.spotify.com/track/1", &out.to_string_lossy());
        let text = report.to_string();
        assert!(text.contains("https://open.spotify.com/track/1\n--output\n"));
        assert!(text.contains("{title} - {artist}.{output-ext}"));
    }

    #[test]
    #[serial]
    fn test_unknown_program_never_panics() {
        let tmp = tempfile::tempdir().unwrap();
        let tools = ToolsConfig {
            yt_dlp: "mediadl-no-such-tool".to_string(),
            ..Default::default()
        };
        let report = Dispatcher::new(tools)
            .download("https://youtu.be/a", &tmp.path().join("out").to_string_lossy());
        assert!(!report.success);
        assert!(report.headline().contains("mediadl-no-such-tool"));
    }
}
