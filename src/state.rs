use eframe::egui::TextureHandle;

use crate::color::chromaticity::{AxisFallback, DISPLAY_SUM_EPSILON, GAMUT_SUM_EPSILON};
use crate::color::convert::ColorConverter;
use crate::color::gamut::{GamutParams, GamutView};
use crate::data::model::SpectralScan;

// ---------------------------------------------------------------------------
// Render modes
// ---------------------------------------------------------------------------

/// The four render modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotMode {
    #[default]
    Curve,
    Scatter3d,
    Chromaticity,
    Gamut,
}

impl PlotMode {
    pub const ALL: [PlotMode; 4] = [
        PlotMode::Curve,
        PlotMode::Scatter3d,
        PlotMode::Chromaticity,
        PlotMode::Gamut,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PlotMode::Curve => "Curves",
            PlotMode::Scatter3d => "3D Scatter",
            PlotMode::Chromaticity => "Chromaticity",
            PlotMode::Gamut => "Gamut",
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// All tunable knobs of the color pipeline and the scatter camera,
/// live-editable in the side panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Background raster is `resolution × resolution`.
    pub resolution: usize,
    /// Chromaticity plot bounds.
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    /// Fixed luminance for reconstructing display colors of projected points.
    pub luminance: f64,
    /// X+Y+Z exclusion threshold for the display projection.
    pub display_epsilon: f64,
    /// X+Y+Z exclusion threshold for the gamut-boundary projection.
    pub gamut_epsilon: f64,
    /// What to do with points on the y ≈ 0 axis of the chromaticity plane.
    pub axis_fallback: AxisFallback,
    /// Label every n-th sample along the trajectory.
    pub annotation_stride: usize,
    /// Only label wavelengths inside this window (nm).
    pub annotation_window: (f64, f64),
    /// Orbit camera for the 3D scatter.
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            resolution: 600,
            x_range: (0.0, 0.8),
            y_range: (0.0, 0.9),
            luminance: 0.5,
            display_epsilon: DISPLAY_SUM_EPSILON,
            gamut_epsilon: GAMUT_SUM_EPSILON,
            axis_fallback: AxisFallback::Black,
            annotation_stride: 10,
            annotation_window: (450.0, 650.0),
            yaw: 0.7,
            pitch: 0.5,
        }
    }
}

impl PlotConfig {
    pub fn gamut_params(&self) -> GamutParams {
        GamutParams {
            resolution: self.resolution,
            x_range: self.x_range,
            y_range: self.y_range,
            sum_epsilon: self.gamut_epsilon,
            annotation_stride: self.annotation_stride,
            annotation_window: self.annotation_window,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Cached gamut artifacts: the computed view plus its uploaded texture.
/// Rebuilt only when the scan or a gamut-relevant setting changes.
pub struct GamutCache {
    pub view: GamutView,
    pub texture: TextureHandle,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded scan (None until user loads a file).
    pub scan: Option<SpectralScan>,

    /// Active render mode.
    pub mode: PlotMode,

    /// Pipeline configuration.
    pub config: PlotConfig,

    /// XYZ → RGB conversion (default sRGB/D65 basis).
    pub converter: ColorConverter,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Cached gamut render; Err holds the reported construction failure
    /// so it is surfaced once and not recomputed every frame.
    pub gamut_cache: Option<Result<GamutCache, String>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            scan: None,
            mode: PlotMode::default(),
            config: PlotConfig::default(),
            converter: ColorConverter::default(),
            status_message: None,
            gamut_cache: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded scan and drop stale render artifacts.
    pub fn set_scan(&mut self, scan: SpectralScan) {
        self.scan = Some(scan);
        self.status_message = None;
        self.invalidate_gamut();
    }

    /// Force the gamut raster/boundary to be rebuilt on next draw.
    pub fn invalidate_gamut(&mut self) {
        self.gamut_cache = None;
    }
}
