use crate::data::model::SpectralSample;

// ---------------------------------------------------------------------------
// Projection onto the X+Y+Z=1 chromaticity plane
// ---------------------------------------------------------------------------

/// Sum threshold below which a sample is excluded from display projection.
pub const DISPLAY_SUM_EPSILON: f64 = 1e-6;

/// Sum threshold for the gamut-boundary path (more permissive: faint
/// samples still shape the boundary).
pub const GAMUT_SUM_EPSILON: f64 = 1e-9;

/// Below this `y` value, reconstruction back to XYZ would divide by zero.
pub const Y_AXIS_EPSILON: f64 = 1e-9;

/// A chromaticity coordinate pair on the X+Y+Z=1 plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chromaticity {
    pub x: f64,
    pub y: f64,
}

/// A sample that survived projection, keeping its wavelength label for
/// trajectory annotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedSample {
    pub wavelength: f64,
    pub xy: Chromaticity,
}

/// Project samples onto the chromaticity plane: `x = X/s`, `y = Y/s`
/// with `s = X+Y+Z`.
///
/// Samples with `|s| < sum_epsilon` carry no usable chromaticity and are
/// excluded rather than producing NaN coordinates. Input order is
/// preserved among the survivors.
pub fn project(samples: &[SpectralSample], sum_epsilon: f64) -> Vec<ProjectedSample> {
    samples
        .iter()
        .filter_map(|sample| {
            let [big_x, big_y, big_z] = sample.tristimulus;
            let sum = big_x + big_y + big_z;
            if sum.abs() < sum_epsilon {
                return None;
            }
            Some(ProjectedSample {
                wavelength: sample.wavelength,
                xy: Chromaticity {
                    x: big_x / sum,
                    y: big_y / sum,
                },
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Reconstruction back to XYZ at a chosen luminance
// ---------------------------------------------------------------------------

/// Policy for chromaticity points on the y ≈ 0 axis, where `X = x/y·Y`
/// is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisFallback {
    /// Substitute `X = Z = 0`; the point renders as black.
    #[default]
    Black,
    /// Drop the point entirely.
    Skip,
}

/// Rebuild a plausible tristimulus triple for a chromaticity point at a
/// fixed luminance: `Y = luminance`, `X = x/y·Y`, `Z = (1−x−y)/y·Y`.
///
/// Renormalizes luminance deliberately: re-projecting the result gives
/// back the same (x, y), not the original magnitudes.
pub fn unproject(xy: Chromaticity, luminance: f64, fallback: AxisFallback) -> Option<[f64; 3]> {
    if xy.y > Y_AXIS_EPSILON {
        let big_x = xy.x / xy.y * luminance;
        let big_z = (1.0 - xy.x - xy.y) / xy.y * luminance;
        Some([big_x, luminance, big_z])
    } else {
        match fallback {
            AxisFallback::Black => Some([0.0, luminance, 0.0]),
            AxisFallback::Skip => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(wavelength: f64, xyz: [f64; 3]) -> SpectralSample {
        SpectralSample {
            wavelength,
            tristimulus: xyz,
        }
    }

    #[test]
    fn projects_basic_ratio() {
        let pts = project(&[sample(550.0, [1.0, 2.0, 1.0])], DISPLAY_SUM_EPSILON);
        assert_eq!(pts.len(), 1);
        assert!((pts[0].xy.x - 0.25).abs() < 1e-12);
        assert!((pts[0].xy.y - 0.50).abs() < 1e-12);
        assert!((pts[0].wavelength - 550.0).abs() < 1e-12);
    }

    #[test]
    fn zero_sample_is_excluded_not_nan() {
        let pts = project(&[sample(550.0, [0.0, 0.0, 0.0])], DISPLAY_SUM_EPSILON);
        assert!(pts.is_empty());
    }

    #[test]
    fn threshold_is_a_parameter() {
        let faint = [sample(550.0, [1e-8, 2e-8, 1e-8])];
        assert!(project(&faint, DISPLAY_SUM_EPSILON).is_empty());
        assert_eq!(project(&faint, GAMUT_SUM_EPSILON).len(), 1);
    }

    #[test]
    fn round_trip_preserves_chromaticity_not_magnitude() {
        let original = sample(600.0, [3.0, 5.0, 2.0]);
        let xy = project(&[original], DISPLAY_SUM_EPSILON)[0].xy;

        let xyz = unproject(xy, 0.5, AxisFallback::Black).unwrap();
        let back = project(&[sample(600.0, xyz)], DISPLAY_SUM_EPSILON)[0].xy;

        assert!((back.x - xy.x).abs() < 1e-12);
        assert!((back.y - xy.y).abs() < 1e-12);
        // Magnitudes are renormalized to the requested luminance.
        assert!((xyz[1] - 0.5).abs() < 1e-12);
        assert!((xyz[1] - original.tristimulus[1]).abs() > 1.0);
    }

    #[test]
    fn axis_fallback_black_and_skip() {
        let on_axis = Chromaticity { x: 0.4, y: 0.0 };
        assert_eq!(
            unproject(on_axis, 0.5, AxisFallback::Black),
            Some([0.0, 0.5, 0.0])
        );
        assert_eq!(unproject(on_axis, 0.5, AxisFallback::Skip), None);
    }
}
