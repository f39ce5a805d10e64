mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::SpectrumPlotApp;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let mut state = AppState::default();

    // Optional positional argument: a data file to load at startup.
    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        match data::loader::load_file(&path) {
            Ok(scan) => {
                log::info!("Loaded {} samples from {}", scan.len(), scan.source_name);
                state.set_scan(scan);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Spectrum Plot – Tristimulus Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(SpectrumPlotApp::new(state)))),
    )
}
