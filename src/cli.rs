use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{Cell, Color, Table};
use dialoguer::Input;

use crate::config::{self, ToolsConfig};
use crate::core::diagnostics;
use crate::core::dispatcher::Dispatcher;
use crate::models::{ToolStatus, DEFAULT_OUTPUT_FOLDER};

#[derive(Parser)]
#[command(
    name = "mediadl",
    version,
    about = "Download Spotify or YouTube audio through spotdl and yt-dlp"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch the GUI
    #[arg(long)]
    pub gui: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download a Spotify track/album/playlist or any yt-dlp supported URL
    Download {
        /// Spotify or YouTube (or other) URL
        url: String,
        /// Output folder
        #[arg(short, long, default_value = DEFAULT_OUTPUT_FOLDER)]
        output: String,
    },
    /// Check that yt-dlp, spotdl and ffmpeg can be run
    Check {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the program used for each external tool
    Config,
}

/// Runs the parsed command. `Ok(false)` means the command ran but
/// its outcome was a failure the process should signal through its exit code.
pub fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Some(Commands::Download { url, output }) => cmd_download(&url, &output),
        Some(Commands::Check { json }) => cmd_check(json),
        Some(Commands::Config) => cmd_config().map(|_| true),
        None => {
            if cli.gui {
                #[cfg(feature = "gui")]
                {
                    crate::gui::launch()?;
                    Ok(true)
                }
                #[cfg(not(feature = "gui"))]
                {
                    anyhow::bail!("GUI support is not enabled. Rebuild with: cargo build --features gui");
                }
            } else {
                println!("Usage: mediadl download <URL> [--output <DIR>] or mediadl --gui");
                println!("Run mediadl --help for more information.");
                Ok(true)
            }
        }
    }
}

fn cmd_download(url: &str, output: &str) -> Result<bool> {
    let cfg = config::load_config();
    let dispatcher = Dispatcher::new(cfg.tools);

    let report = dispatcher.download_with_progress(url, output, |fraction, message| {
        tracing::info!("{:>3.0}% {}", fraction * 100.0, message);
    });

    println!("{}", report);
    Ok(report.success)
}

fn cmd_check(json: bool) -> Result<bool> {
    let cfg = config::load_config();
    let statuses = diagnostics::check_tools(&cfg.tools);

    if json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
    } else {
        println!("{}", status_table(&statuses));
        if !diagnostics::all_available(&statuses) {
            println!("\nSome tools are missing. Install them or set their paths with 'mediadl config'.");
        }
    }

    Ok(diagnostics::all_available(&statuses))
}

fn status_table(statuses: &[ToolStatus]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Tool", "Status", "Detail"]);

    for status in statuses {
        let state = if status.available {
            Cell::new("found").fg(Color::Green)
        } else {
            Cell::new("missing").fg(Color::Red)
        };
        table.add_row(vec![Cell::new(&status.tool), state, Cell::new(&status.detail)]);
    }
    table
}

fn cmd_config() -> Result<()> {
    let mut cfg = config::load_config();

    println!("External tool settings");
    println!("(enter a program name found on PATH, or a full path)\n");

    let spotdl = prompt_program("spotdl", &cfg.tools.spotdl)?;
    let yt_dlp = prompt_program("yt-dlp", &cfg.tools.yt_dlp)?;
    let ffmpeg = prompt_program("ffmpeg", &cfg.tools.ffmpeg)?;

    cfg.tools = ToolsConfig {
        spotdl,
        yt_dlp,
        ffmpeg,
    };

    let path = config::save_config(&cfg)?;
    println!("\nSaved settings to {}", path.display());
    Ok(())
}

fn prompt_program(label: &str, current: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(label)
        .with_initial_text(current)
        .interact_text()
        .with_context(|| format!("failed to read the {} program", label))?;
    Ok(value.trim().to_string())
}
