#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use timeline_app::app::TimelineApp;
use timeline_app::config::{AppPaths, AppSettings};
use timeline_app::logging;

fn main() -> eframe::Result<()> {
    let paths = AppPaths::discover();
    AppSettings::write_default_if_missing(&paths.settings_path);
    let settings = AppSettings::load(&paths.settings_path);

    if let Err(e) = logging::init(&paths.log_path, &settings.log_filter) {
        eprintln!("logging disabled: {e}");
    }
    tracing::info!(settings = ?paths.settings_path, "starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 420.0])
            .with_min_inner_size([480.0, 240.0])
            .with_title("Rust Timeline App"),
        ..Default::default()
    };

    eframe::run_native(
        "Rust Timeline App",
        options,
        Box::new(move |cc| Ok(Box::new(TimelineApp::new(cc, settings, paths)))),
    )
}
