#[cfg(feature = "gui")]
mod app;

#[cfg(feature = "gui")]
pub fn launch() -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([760.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Media Downloader",
        options,
        Box::new(|cc| Ok(Box::new(app::MediaDlApp::new(cc)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start the GUI: {}", e))
}
