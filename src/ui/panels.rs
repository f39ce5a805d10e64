use eframe::egui::{self, Color32, DragValue, RichText, Slider, Ui};

use crate::color::chromaticity::AxisFallback;
use crate::state::{AppState, PlotMode};

// ---------------------------------------------------------------------------
// Top bar – file menu, mode switch, status line
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for mode in PlotMode::ALL {
            if ui
                .selectable_label(state.mode == mode, mode.label())
                .clicked()
            {
                state.mode = mode;
            }
        }

        ui.separator();

        if let Some(scan) = &state.scan {
            ui.label(format!("{} – {} samples", scan.source_name, scan.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – per-mode settings
// ---------------------------------------------------------------------------

/// Render the settings panel. Gamut-relevant edits invalidate the
/// cached background texture.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Settings");
    ui.separator();

    let before = state.config.clone();

    match state.mode {
        PlotMode::Curve => {
            ui.label("Per-channel X/Y/Z irradiance over wavelength.");
        }
        PlotMode::Scatter3d => {
            ui.strong("Orbit camera");
            ui.add(Slider::new(&mut state.config.yaw, -3.2..=3.2).text("Yaw"));
            ui.add(Slider::new(&mut state.config.pitch, -1.6..=1.6).text("Pitch"));
        }
        PlotMode::Chromaticity => {
            ui.strong("Point colors");
            ui.add(
                Slider::new(&mut state.config.luminance, 0.05..=1.0).text("Display luminance"),
            );
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Σ threshold");
                ui.add(
                    DragValue::new(&mut state.config.display_epsilon)
                        .speed(1e-7)
                        .range(0.0..=1.0),
                );
            });
            ui.label("Points on the y ≈ 0 axis:");
            ui.horizontal(|ui: &mut Ui| {
                for (policy, label) in
                    [(AxisFallback::Black, "Black"), (AxisFallback::Skip, "Skip")]
                {
                    if ui
                        .selectable_label(state.config.axis_fallback == policy, label)
                        .clicked()
                    {
                        state.config.axis_fallback = policy;
                    }
                }
            });
        }
        PlotMode::Gamut => {
            ui.strong("Background");
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Resolution");
                ui.add(
                    DragValue::new(&mut state.config.resolution)
                        .speed(10)
                        .range(50..=1000),
                );
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Σ threshold");
                ui.add(
                    DragValue::new(&mut state.config.gamut_epsilon)
                        .speed(1e-10)
                        .range(0.0..=1.0),
                );
            });
            ui.separator();
            ui.strong("Wavelength labels");
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Stride");
                ui.add(
                    DragValue::new(&mut state.config.annotation_stride)
                        .speed(1)
                        .range(1..=100),
                );
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Window (nm)");
                ui.add(
                    DragValue::new(&mut state.config.annotation_window.0)
                        .speed(5.0)
                        .range(200.0..=state.config.annotation_window.1),
                );
                ui.label("–");
                ui.add(
                    DragValue::new(&mut state.config.annotation_window.1)
                        .speed(5.0)
                        .range(state.config.annotation_window.0..=1200.0),
                );
            });
        }
    }

    if state.config.gamut_params() != before.gamut_params() {
        state.invalidate_gamut();
    }

    ui.separator();
    if let Some(scan) = &state.scan {
        if let Some((lo, hi)) = scan.wavelength_range() {
            ui.label(format!("Wavelengths: {lo:.0}–{hi:.0} nm"));
        }
    } else {
        ui.label("No scan loaded.");
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open spectral data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(scan) => {
                log::info!("Loaded {} samples from {}", scan.len(), scan.source_name);
                state.set_scan(scan);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
