use eframe::egui::{Color32, ColorImage, RichText, Stroke, TextureOptions, Ui, Vec2};
use egui_plot::{
    Legend, Line, LineStyle, Plot, PlotImage, PlotPoint, PlotPoints, Points, Polygon, Text,
};

use crate::color::chromaticity;
use crate::color::gamut::{self, ChromaticityRaster};
use crate::color::scale;
use crate::state::{AppState, GamutCache, PlotMode};

// ---------------------------------------------------------------------------
// Central panel – mode dispatch
// ---------------------------------------------------------------------------

/// Render the active mode in the central panel.
pub fn render(ui: &mut Ui, state: &mut AppState) {
    if state.scan.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view a spectrum  (File → Open…)");
        });
        return;
    }

    match state.mode {
        PlotMode::Curve => curve_plot(ui, state),
        PlotMode::Scatter3d => scatter3d_plot(ui, state),
        PlotMode::Chromaticity => chromaticity_plot(ui, state),
        PlotMode::Gamut => gamut_plot(ui, state),
    }
}

// ---------------------------------------------------------------------------
// Mode 0: per-channel intensity curves
// ---------------------------------------------------------------------------

fn curve_plot(ui: &mut Ui, state: &AppState) {
    let scan = state.scan.as_ref().unwrap();

    let channel_series = |channel: usize| -> PlotPoints {
        scan.samples
            .iter()
            .map(|s| [s.wavelength, s.tristimulus[channel]])
            .collect()
    };

    Plot::new("curve_plot")
        .legend(Legend::default())
        .x_axis_label("Wavelength (nm)")
        .y_axis_label("Irradiance")
        .show(ui, |plot_ui| {
            for (channel, name, color) in [
                (0, "Irradiance X", Color32::RED),
                (1, "Irradiance Y", Color32::GREEN),
                (2, "Irradiance Z", Color32::BLUE),
            ] {
                plot_ui.line(
                    Line::new(channel_series(channel))
                        .name(name)
                        .color(color)
                        .width(1.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Mode 1: 3D scatter of the tristimulus trajectory
// ---------------------------------------------------------------------------

/// Orthographic orbit projection of an XYZ point onto the screen plane.
fn orbit_project(p: [f64; 3], yaw: f32, pitch: f32) -> [f64; 2] {
    let (sin_yaw, cos_yaw) = (yaw as f64).sin_cos();
    let (sin_pitch, cos_pitch) = (pitch as f64).sin_cos();
    let u = -sin_yaw * p[0] + cos_yaw * p[1];
    let v = -sin_pitch * (cos_yaw * p[0] + sin_yaw * p[1]) + cos_pitch * p[2];
    [u, v]
}

fn scatter3d_plot(ui: &mut Ui, state: &AppState) {
    let scan = state.scan.as_ref().unwrap();
    let (yaw, pitch) = (state.config.yaw, state.config.pitch);
    let wl_range = scan.wavelength_range().unwrap_or((380.0, 780.0));
    let axis_len = scan.max_tristimulus().max(f64::MIN_POSITIVE);

    Plot::new("scatter3d_plot")
        .data_aspect(1.0)
        .show_axes([false, false])
        .show(ui, |plot_ui| {
            // Axis tripod with labels.
            for (axis, label) in [
                ([axis_len, 0.0, 0.0], "X"),
                ([0.0, axis_len, 0.0], "Y"),
                ([0.0, 0.0, axis_len], "Z"),
            ] {
                let tip = orbit_project(axis, yaw, pitch);
                plot_ui.line(
                    Line::new(PlotPoints::from(vec![[0.0, 0.0], tip]))
                        .color(Color32::DARK_GRAY)
                        .width(1.0),
                );
                plot_ui.text(Text::new(
                    PlotPoint::new(tip[0] * 1.05, tip[1] * 1.05),
                    RichText::new(label).strong(),
                ));
            }

            for sample in &scan.samples {
                let [u, v] = orbit_project(sample.tristimulus, yaw, pitch);
                plot_ui.points(
                    Points::new(vec![[u, v]])
                        .color(scale::wavelength_color(sample.wavelength, wl_range))
                        .radius(3.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Mode 2: CIE 1931 xy chromaticity diagram
// ---------------------------------------------------------------------------

fn chromaticity_plot(ui: &mut Ui, state: &AppState) {
    let scan = state.scan.as_ref().unwrap();
    let projected = chromaticity::project(&scan.samples, state.config.display_epsilon);

    if projected.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(
                RichText::new("All samples have X+Y+Z near zero; no chromaticity to show.")
                    .color(Color32::RED),
            );
        });
        return;
    }

    let luminance = state.config.luminance;
    let fallback = state.config.axis_fallback;
    let converter = &state.converter;

    Plot::new("chromaticity_plot")
        .data_aspect(1.0)
        .x_axis_label("x Chromaticity Coordinate")
        .y_axis_label("y Chromaticity Coordinate")
        .include_x(-0.1)
        .include_x(0.9)
        .include_y(-0.1)
        .include_y(1.0)
        .show(ui, |plot_ui| {
            // Gray trajectory under the colored markers.
            let trajectory: PlotPoints = projected.iter().map(|p| [p.xy.x, p.xy.y]).collect();
            plot_ui.line(
                Line::new(trajectory)
                    .color(Color32::GRAY)
                    .style(LineStyle::dashed_loose())
                    .width(0.5),
            );

            // Each point drawn in the color it actually represents, at a
            // fixed display luminance.
            for p in &projected {
                let Some(xyz) = chromaticity::unproject(p.xy, luminance, fallback) else {
                    continue;
                };
                let [r, g, b] = converter.srgb_from_xyz(xyz).to_u8();
                plot_ui.points(
                    Points::new(vec![[p.xy.x, p.xy.y]])
                        .color(Color32::from_rgb(r, g, b))
                        .radius(4.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Mode 3: filled gamut over the perceivable-color background
// ---------------------------------------------------------------------------

/// Convert a raster to an egui image. The raster's row 0 is the bottom
/// row, egui images are top-down, so rows are flipped here.
fn raster_to_image(raster: &ChromaticityRaster) -> ColorImage {
    let res = raster.resolution;
    let mut pixels = Vec::with_capacity(res * res);
    for row in (0..res).rev() {
        for col in 0..res {
            let [r, g, b] = raster.pixels[row * res + col].to_u8();
            pixels.push(Color32::from_rgb(r, g, b));
        }
    }
    ColorImage {
        size: [res, res],
        pixels,
    }
}

/// Build the gamut view and texture once; the result (or the failure
/// message) is cached until the scan or settings change.
fn ensure_gamut_cache(ui: &Ui, state: &mut AppState) {
    if state.gamut_cache.is_some() {
        return;
    }
    let Some(scan) = &state.scan else { return };

    let result = gamut::gamut_view(
        &scan.samples,
        &state.config.gamut_params(),
        &state.converter,
    );

    state.gamut_cache = Some(match result {
        Ok(view) => {
            let image = raster_to_image(&view.raster);
            let texture = ui
                .ctx()
                .load_texture("gamut_background", image, TextureOptions::LINEAR);
            Ok(GamutCache { view, texture })
        }
        Err(e) => {
            log::error!("Gamut construction failed: {e}");
            Err(e.to_string())
        }
    });
}

fn gamut_plot(ui: &mut Ui, state: &mut AppState) {
    ensure_gamut_cache(ui, state);

    let cache = match &state.gamut_cache {
        Some(Ok(cache)) => cache,
        Some(Err(message)) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(RichText::new(format!("Error: {message}")).color(Color32::RED));
            });
            return;
        }
        None => return,
    };

    let (x_range, y_range) = (state.config.x_range, state.config.y_range);
    let center = PlotPoint::new(
        (x_range.0 + x_range.1) / 2.0,
        (y_range.0 + y_range.1) / 2.0,
    );
    let extent = Vec2::new(
        (x_range.1 - x_range.0) as f32,
        (y_range.1 - y_range.0) as f32,
    );

    Plot::new("gamut_plot")
        .data_aspect(1.0)
        .x_axis_label("x")
        .y_axis_label("y")
        .include_x(x_range.0)
        .include_x(x_range.1)
        .include_y(y_range.0)
        .include_y(y_range.1)
        .show(ui, |plot_ui| {
            plot_ui.image(PlotImage::new(cache.texture.id(), center, extent));

            let boundary: Vec<[f64; 2]> = cache
                .view
                .polygon
                .vertices()
                .iter()
                .map(|p| [p.x, p.y])
                .collect();
            plot_ui.polygon(
                Polygon::new(PlotPoints::from(boundary))
                    .fill_color(Color32::TRANSPARENT)
                    .stroke(Stroke::new(3.0, Color32::BLACK)),
            );

            for a in &cache.view.annotations {
                plot_ui.points(
                    Points::new(vec![[a.x, a.y]])
                        .color(Color32::BLACK)
                        .radius(4.0),
                );
                plot_ui.text(Text::new(
                    PlotPoint::new(a.x + 0.01, a.y + 0.01),
                    RichText::new(format!("{:.0} nm", a.wavelength))
                        .size(10.0)
                        .color(Color32::BLACK),
                ));
            }
        });
}
