use std::fmt;
use std::path::Path;

use crate::config::ToolsConfig;
use crate::models::Tool;

/// spotdl output template; `{output-ext}` is filled in by spotdl.
const SPOTDL_TEMPLATE: &str = "{title} - {artist}.{output-ext}";
/// yt-dlp output template.
const YTDLP_TEMPLATE: &str = "%(title)s.%(ext)s";
const AUDIO_FORMAT: &str = "mp3";

/// A fully built external tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub tool: Tool,
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for ToolCommand {
    /// The command line as a user would type it, arguments joined by spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Builds the argument list for `tool` downloading `url` into `output_folder`.
///
/// - spotdl: `<url> --output <folder>/{title} - {artist}.{output-ext}`
/// - yt-dlp: `-x --audio-format mp3 -o <folder>/%(title)s.%(ext)s <url>`
pub fn build_command(
    tools: &ToolsConfig,
    tool: Tool,
    url: &str,
    output_folder: &Path,
) -> ToolCommand {
    let program = tools.program(tool).to_string();
    let args = match tool {
        Tool::Spotdl => vec![
            url.to_string(),
            "--output".to_string(),
            output_template(output_folder, SPOTDL_TEMPLATE),
        ],
        // ffmpeg is never dispatched to; it only backs yt-dlp's transcoding
        Tool::YtDlp | Tool::Ffmpeg => vec![
            "-x".to_string(),
            "--audio-format".to_string(),
            AUDIO_FORMAT.to_string(),
            "-o".to_string(),
            output_template(output_folder, YTDLP_TEMPLATE),
            url.to_string(),
        ],
    };

    ToolCommand {
        tool,
        program,
        args,
    }
}

fn output_template(folder: &Path, template: &str) -> String {
    folder.join(template).to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPOTIFY_URL: &str = "https://open.spotify.com/track/abc";
    const YOUTUBE_URL: &str = "https://youtu.be/xyz";

    #[test]
    fn test_spotdl_command_shape() {
        let cmd = build_command(
            &ToolsConfig::default(),
            Tool::Spotdl,
            SPOTIFY_URL,
            Path::new("out"),
        );
        assert_eq!(cmd.program, "spotdl");
        assert_eq!(cmd.args[0], SPOTIFY_URL);
        assert_eq!(cmd.args[1], "--output");
        assert_eq!(
            cmd.args[2],
            Path::new("out")
                .join("{title} - {artist}.{output-ext}")
                .to_string_lossy()
        );
    }

    #[test]
    fn test_spotdl_command_line_references_folder() {
        let cmd = build_command(
            &ToolsConfig::default(),
            Tool::Spotdl,
            SPOTIFY_URL,
            Path::new("out"),
        );
        let line = cmd.to_string();
        assert!(line.starts_with("spotdl https://open.spotify.com/track/abc --output out"));
    }

    #[test]
    fn test_ytdlp_command_shape() {
        let cmd = build_command(
            &ToolsConfig::default(),
            Tool::YtDlp,
            YOUTUBE_URL,
            Path::new("music"),
        );
        assert_eq!(cmd.program, "yt-dlp");
        assert_eq!(&cmd.args[..4], ["-x", "--audio-format", "mp3", "-o"]);
        assert!(cmd.args[4].starts_with("music"));
        assert!(cmd.args[4].ends_with("%(title)s.%(ext)s"));
        assert_eq!(cmd.args[5], YOUTUBE_URL);
    }

    #[test]
    fn test_configured_program_is_used() {
        let tools = ToolsConfig {
            yt_dlp: "/usr/local/bin/yt-dlp".to_string(),
            ..Default::default()
        };
        let cmd = build_command(&tools, Tool::YtDlp, YOUTUBE_URL, Path::new("d"));
        assert!(cmd.to_string().starts_with("/usr/local/bin/yt-dlp -x"));
    }
}
