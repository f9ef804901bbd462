use std::sync::mpsc;

use egui::Color32;
use tracing::debug;

use crate::config::{self, ToolsConfig};
use crate::core::diagnostics;
use crate::core::dispatcher::Dispatcher;
use crate::models::{Report, ToolStatus, DEFAULT_OUTPUT_FOLDER};

enum BgResult {
    ToolsChecked(Vec<ToolStatus>),
    Progress(f32, String),
    DownloadDone(Report),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DispatchState {
    Idle,
    Running,
}

pub struct MediaDlApp {
    // Inputs
    url: String,
    output_folder: String,

    // Last download
    log: String,
    progress: f32,
    progress_msg: String,
    state: DispatchState,

    // Startup check
    tool_statuses: Option<Vec<ToolStatus>>,

    tools: ToolsConfig,
    tx: mpsc::Sender<BgResult>,
    rx: mpsc::Receiver<BgResult>,
}

impl MediaDlApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self::setup_cjk_fonts(&cc.egui_ctx);
        let (tx, rx) = mpsc::channel();

        let app = Self {
            url: String::new(),
            output_folder: String::new(),
            log: String::new(),
            progress: 0.0,
            progress_msg: String::new(),
            state: DispatchState::Idle,
            tool_statuses: None,
            tools: config::load_config().tools,
            tx,
            rx,
        };

        app.start_tool_check(&cc.egui_ctx);
        app
    }

    /// Track titles in tool output are often Japanese or Korean; the
    /// default egui fonts have no CJK glyphs.
    fn setup_cjk_fonts(ctx: &egui::Context) {
        let mut fonts = egui::FontDefinitions::default();

        let font_paths = [
            // macOS
            "/System/Library/Fonts/Hiragino Sans GB.ttc",
            "/System/Library/Fonts/AppleSDGothicNeo.ttc",
            // Linux
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
            // Windows
            "C:\\Windows\\Fonts\\meiryo.ttc",
        ];

        let Some((path, font_data)) = font_paths
            .iter()
            .find_map(|path| std::fs::read(path).ok().map(|data| (path, data)))
        else {
            debug!("no CJK font found, using egui defaults");
            return;
        };

        debug!(font = *path, "loaded CJK fallback font");
        fonts
            .font_data
            .insert("cjk".to_string(), egui::FontData::from_owned(font_data));
        for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
            if let Some(list) = fonts.families.get_mut(&family) {
                list.push("cjk".to_string());
            }
        }
        ctx.set_fonts(fonts);
    }

    fn start_tool_check(&self, ctx: &egui::Context) {
        let tx = self.tx.clone();
        let tools = self.tools.clone();
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let statuses = diagnostics::check_tools(&tools);
            let _ = tx.send(BgResult::ToolsChecked(statuses));
            ctx.request_repaint();
        });
    }

    fn start_download(&mut self, ctx: &egui::Context) {
        if self.state == DispatchState::Running {
            return;
        }
        let url = self.url.trim().to_string();
        if url.is_empty() {
            self.log = "Enter a URL first.".to_string();
            return;
        }

        let folder = self.output_folder.trim().to_string();
        let tools = self.tools.clone();
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        self.state = DispatchState::Running;
        self.progress = 0.0;
        self.progress_msg = "Starting...".to_string();
        self.log.clear();

        std::thread::spawn(move || {
            let dispatcher = Dispatcher::new(tools);
            let report = dispatcher.download_with_progress(&url, &folder, |fraction, message| {
                let _ = tx.send(BgResult::Progress(fraction, message.to_string()));
                ctx.request_repaint();
            });
            let _ = tx.send(BgResult::DownloadDone(report));
            ctx.request_repaint();
        });
    }

    fn process_bg_results(&mut self) {
        while let Ok(result) = self.rx.try_recv() {
            match result {
                BgResult::ToolsChecked(statuses) => {
                    self.tool_statuses = Some(statuses);
                }
                BgResult::Progress(fraction, message) => {
                    self.progress = fraction;
                    self.progress_msg = message;
                }
                BgResult::DownloadDone(report) => {
                    self.state = DispatchState::Idle;
                    self.progress = 1.0;
                    self.progress_msg = report.headline().to_string();
                    self.log = report.to_string();
                }
            }
        }
    }

    fn tool_status_ui(&self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            let Some(ref statuses) = self.tool_statuses else {
                ui.spinner();
                ui.label("Checking yt-dlp, spotdl and ffmpeg...");
                return;
            };
            for status in statuses {
                let (mark, color) = if status.available {
                    ("✔", Color32::from_rgb(60, 170, 90))
                } else {
                    ("✘", Color32::from_rgb(210, 70, 70))
                };
                ui.colored_label(color, format!("{} {}", mark, status.tool))
                    .on_hover_text(status.detail.as_str());
            }
            if !diagnostics::all_available(statuses) {
                ui.label("Missing tools can be configured with `mediadl config`.");
            }
        });
    }
}

impl eframe::App for MediaDlApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_bg_results();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.heading("Media Downloader (spotdl & yt-dlp)");
            ui.label("Paste a Spotify track, album or playlist URL, or a YouTube (or other) URL. Audio is saved as MP3.");
            self.tool_status_ui(ui);
        });

        egui::TopBottomPanel::bottom("notes_panel").show(ctx, |ui| {
            ui.small("Playlists can take a while. Respect copyright and keep downloads for personal use.");
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Grid::new("input_grid")
                .num_columns(2)
                .spacing([10.0, 6.0])
                .show(ui, |ui| {
                    ui.label("URL:");
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.url)
                            .hint_text("Paste a Spotify or YouTube URL here...")
                            .desired_width(f32::INFINITY),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        self.start_download(ctx);
                    }
                    ui.end_row();

                    ui.label("Folder:");
                    ui.horizontal(|ui| {
                        ui.add(
                            egui::TextEdit::singleline(&mut self.output_folder)
                                .hint_text(format!("defaults to '{}'", DEFAULT_OUTPUT_FOLDER)),
                        );
                        if ui.button("Browse").clicked() {
                            if let Some(folder) = rfd::FileDialog::new().pick_folder() {
                                self.output_folder = folder.display().to_string();
                            }
                        }
                    });
                    ui.end_row();
                });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let idle = self.state == DispatchState::Idle;
                if ui.add_enabled(idle, egui::Button::new("Download")).clicked() {
                    self.start_download(ctx);
                }
                if !idle {
                    ui.spinner();
                }
            });

            if self.state == DispatchState::Running || self.progress > 0.0 {
                ui.add(egui::ProgressBar::new(self.progress).text(self.progress_msg.as_str()));
            }

            ui.separator();
            ui.label("Log:");
            egui::ScrollArea::vertical().show(ui, |ui| {
                let mut log = self.log.as_str();
                ui.add(
                    egui::TextEdit::multiline(&mut log)
                        .hint_text("Download results appear here...")
                        .desired_rows(20)
                        .desired_width(f32::INFINITY)
                        .code_editor(),
                );
            });
        });
    }
}
