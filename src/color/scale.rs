use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Wavelength → display color scale
// ---------------------------------------------------------------------------

/// Map a wavelength within `[min, max]` to a display color by sweeping
/// hue from violet (short wavelengths) to red (long wavelengths).
///
/// This is a legend scale for the 3D scatter, not a physical spectral
/// color; the physically derived colors live in the chromaticity modes.
pub fn wavelength_color(wavelength: f64, range: (f64, f64)) -> Color32 {
    let span = range.1 - range.0;
    let t = if span.abs() < f64::EPSILON {
        0.5
    } else {
        ((wavelength - range.0) / span).clamp(0.0, 1.0)
    };
    // Hue 280° (violet) down to 0° (red).
    let hue = (1.0 - t) as f32 * 280.0;
    let hsl = Hsl::new(hue, 0.85, 0.5);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_violet_and_red() {
        let short = wavelength_color(380.0, (380.0, 780.0));
        let long = wavelength_color(780.0, (380.0, 780.0));
        // Violet end: blue dominates red-ish; red end: red dominates.
        assert!(short.b() > short.g());
        assert!(long.r() > long.b());
    }

    #[test]
    fn degenerate_range_is_defined() {
        let c = wavelength_color(550.0, (550.0, 550.0));
        assert_ne!(c, Color32::from_rgb(0, 0, 0));
    }
}
