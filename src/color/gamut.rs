use thiserror::Error;

use crate::color::chromaticity::{self, Chromaticity, ProjectedSample};
use crate::color::convert::{ColorConverter, Rgb};
use crate::data::model::SpectralSample;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Construction failures for the gamut render mode. Detected up front at
/// the call site; the numeric pipeline itself never fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GamutError {
    /// Every sample's X+Y+Z fell below the threshold — an upstream data
    /// problem, not a geometry problem.
    #[error("all {total} samples have X+Y+Z below the threshold; no chromaticity point can be computed")]
    AllSamplesInvalid { total: usize },

    /// Fewer than 3 valid points: no closed boundary exists.
    #[error("only {valid} valid chromaticity point(s); at least 3 are needed for a closed gamut boundary")]
    DegenerateSampleSet { valid: usize },
}

// ---------------------------------------------------------------------------
// Background raster over the chromaticity plane
// ---------------------------------------------------------------------------

/// A square grid of display colors over a rectangle of the (x, y)
/// chromaticity plane. Row 0 is the bottom row (y = y_range.0).
#[derive(Debug, Clone)]
pub struct ChromaticityRaster {
    pub resolution: usize,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    /// Row-major, `resolution²` entries.
    pub pixels: Vec<Rgb>,
}

impl ChromaticityRaster {
    /// Synthesize the background of perceivable colors: each cell inside
    /// the simplex `x ≥ 0 ∧ y ≥ 0 ∧ x+y ≤ 1` is colored from its own
    /// coordinates via `XYZ = (x, y, 1−x−y)`; cells outside are white.
    ///
    /// Every cell is independent, so the loop is a plain map with no
    /// cross-cell state.
    pub fn synthesize(
        resolution: usize,
        x_range: (f64, f64),
        y_range: (f64, f64),
        converter: &ColorConverter,
    ) -> Self {
        let mut pixels = Vec::with_capacity(resolution * resolution);
        for row in 0..resolution {
            let y = Self::axis_coord(row, resolution, y_range);
            for col in 0..resolution {
                let x = Self::axis_coord(col, resolution, x_range);
                let color = if x >= 0.0 && y >= 0.0 && x + y <= 1.0 {
                    converter.srgb_from_xyz([x, y, 1.0 - x - y])
                } else {
                    Rgb::WHITE
                };
                pixels.push(color);
            }
        }
        ChromaticityRaster {
            resolution,
            x_range,
            y_range,
            pixels,
        }
    }

    /// Keep cells inside the polygon, blank the rest to white.
    pub fn masked_by(&self, polygon: &GamutPolygon) -> ChromaticityRaster {
        let mut masked = self.clone();
        for row in 0..self.resolution {
            let y = Self::axis_coord(row, self.resolution, self.y_range);
            for col in 0..self.resolution {
                let x = Self::axis_coord(col, self.resolution, self.x_range);
                if !polygon.contains(x, y) {
                    masked.pixels[row * self.resolution + col] = Rgb::WHITE;
                }
            }
        }
        masked
    }

    /// Plane coordinate of a cell center along one axis.
    fn axis_coord(index: usize, resolution: usize, range: (f64, f64)) -> f64 {
        if resolution < 2 {
            return range.0;
        }
        let t = index as f64 / (resolution - 1) as f64;
        range.0 + t * (range.1 - range.0)
    }
}

// ---------------------------------------------------------------------------
// Gamut boundary polygon
// ---------------------------------------------------------------------------

/// A simple closed polygon approximating the data's chromaticity
/// envelope, ordered by ascending angle around the point set's centroid
/// (the last vertex implicitly connects to the first).
///
/// The angular sort assumes the point cloud is star-shaped with respect
/// to its centroid, which holds for typical continuous spectral
/// trajectories. Simplicity is not validated for arbitrary input.
#[derive(Debug, Clone)]
pub struct GamutPolygon {
    vertices: Vec<Chromaticity>,
}

impl GamutPolygon {
    /// Order the points angularly around their centroid.
    ///
    /// Fails with [`GamutError::DegenerateSampleSet`] for fewer than 3
    /// points. The sort is stable: points at identical angles keep their
    /// input order.
    pub fn build(points: &[Chromaticity]) -> Result<GamutPolygon, GamutError> {
        if points.len() < 3 {
            return Err(GamutError::DegenerateSampleSet {
                valid: points.len(),
            });
        }

        let n = points.len() as f64;
        let cx = points.iter().map(|p| p.x).sum::<f64>() / n;
        let cy = points.iter().map(|p| p.y).sum::<f64>() / n;

        let mut vertices = points.to_vec();
        vertices.sort_by(|a, b| {
            let angle_a = (a.y - cy).atan2(a.x - cx);
            let angle_b = (b.y - cy).atan2(b.x - cx);
            angle_a.total_cmp(&angle_b)
        });

        Ok(GamutPolygon { vertices })
    }

    pub fn vertices(&self) -> &[Chromaticity] {
        &self.vertices
    }

    /// Even-odd point-in-polygon test (ray cast along +x). The polygon
    /// is simple by construction, so even-odd and winding agree.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let mut inside = false;
        let n = self.vertices.len();
        let mut j = n - 1;
        for i in 0..n {
            let pi = self.vertices[i];
            let pj = self.vertices[j];
            if (pi.y > y) != (pj.y > y) {
                let x_cross = pi.x + (y - pi.y) / (pj.y - pi.y) * (pj.x - pi.x);
                if x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

// ---------------------------------------------------------------------------
// Wavelength annotations along the trajectory
// ---------------------------------------------------------------------------

/// A wavelength marker on the chromaticity plane, plain data for the
/// rendering layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub wavelength: f64,
}

/// Deterministic subsampling of the ordered projected sequence: every
/// `stride`-th point whose wavelength falls inside `window`.
pub fn annotate(
    projected: &[ProjectedSample],
    stride: usize,
    window: (f64, f64),
) -> Vec<Annotation> {
    let stride = stride.max(1);
    projected
        .iter()
        .step_by(stride)
        .filter(|p| p.wavelength >= window.0 && p.wavelength <= window.1)
        .map(|p| Annotation {
            x: p.xy.x,
            y: p.xy.y,
            wavelength: p.wavelength,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Orchestration for the gamut render mode
// ---------------------------------------------------------------------------

/// Everything the renderer needs for the filled gamut diagram.
#[derive(Debug, Clone)]
pub struct GamutView {
    pub raster: ChromaticityRaster,
    pub polygon: GamutPolygon,
    pub annotations: Vec<Annotation>,
}

/// Parameters for [`gamut_view`], mirroring the configurable knobs of
/// the gamut render mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamutParams {
    pub resolution: usize,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub sum_epsilon: f64,
    pub annotation_stride: usize,
    pub annotation_window: (f64, f64),
}

/// Build the masked background, boundary polygon and wavelength labels
/// for a scan.
///
/// Distinguishes "no sample projects at all" (bad data upstream) from
/// "too few points for a closed boundary" (geometry); both abort the
/// render mode with no partial image.
pub fn gamut_view(
    samples: &[SpectralSample],
    params: &GamutParams,
    converter: &ColorConverter,
) -> Result<GamutView, GamutError> {
    let projected = chromaticity::project(samples, params.sum_epsilon);
    if projected.is_empty() && !samples.is_empty() {
        return Err(GamutError::AllSamplesInvalid {
            total: samples.len(),
        });
    }

    let points: Vec<Chromaticity> = projected.iter().map(|p| p.xy).collect();
    let polygon = GamutPolygon::build(&points)?;

    let raster = ChromaticityRaster::synthesize(
        params.resolution,
        params.x_range,
        params.y_range,
        converter,
    )
    .masked_by(&polygon);

    let annotations = annotate(
        &projected,
        params.annotation_stride,
        params.annotation_window,
    );

    Ok(GamutView {
        raster,
        polygon,
        annotations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy(x: f64, y: f64) -> Chromaticity {
        Chromaticity { x, y }
    }

    #[test]
    fn boundary_needs_three_points() {
        let err = GamutPolygon::build(&[xy(0.1, 0.1), xy(0.5, 0.1)]).unwrap_err();
        assert_eq!(err, GamutError::DegenerateSampleSet { valid: 2 });
    }

    #[test]
    fn boundary_sorts_by_angle_around_centroid() {
        // Centroid ≈ (0.3, 0.167); ascending angles put the two bottom
        // points first, apex last.
        let poly =
            GamutPolygon::build(&[xy(0.3, 0.3), xy(0.1, 0.1), xy(0.5, 0.1)]).unwrap();
        let v = poly.vertices();
        assert_eq!(v.len(), 3);
        assert_eq!((v[0].x, v[0].y), (0.1, 0.1));
        assert_eq!((v[1].x, v[1].y), (0.5, 0.1));
        assert_eq!((v[2].x, v[2].y), (0.3, 0.3));
    }

    #[test]
    fn triangle_containment() {
        let poly =
            GamutPolygon::build(&[xy(0.0, 0.0), xy(1.0, 0.0), xy(0.0, 1.0)]).unwrap();
        assert!(poly.contains(0.2, 0.2));
        assert!(!poly.contains(0.8, 0.8));
        assert!(!poly.contains(-0.1, 0.2));
    }

    #[test]
    fn cells_outside_simplex_are_white() {
        let raster =
            ChromaticityRaster::synthesize(16, (0.0, 0.8), (0.0, 0.9), &ColorConverter::default());
        for row in 0..16 {
            let y = ChromaticityRaster::axis_coord(row, 16, (0.0, 0.9));
            for col in 0..16 {
                let x = ChromaticityRaster::axis_coord(col, 16, (0.0, 0.8));
                if x + y > 1.0 {
                    assert_eq!(raster.pixels[row * 16 + col], Rgb::WHITE);
                }
            }
        }
    }

    #[test]
    fn full_simplex_mask_is_identity() {
        let raster =
            ChromaticityRaster::synthesize(24, (0.0, 0.8), (0.0, 0.9), &ColorConverter::default());
        // A polygon strictly enclosing the whole valid simplex.
        let cover = GamutPolygon::build(&[
            xy(-0.1, -0.1),
            xy(1.1, -0.1),
            xy(1.1, 1.1),
            xy(-0.1, 1.1),
        ])
        .unwrap();
        let masked = raster.masked_by(&cover);
        assert_eq!(masked.pixels, raster.pixels);
    }

    #[test]
    fn annotation_stride_and_window() {
        let projected: Vec<ProjectedSample> = (0..40)
            .map(|i| ProjectedSample {
                wavelength: 400.0 + 10.0 * i as f64,
                xy: xy(0.3, 0.3),
            })
            .collect();
        let labels = annotate(&projected, 10, (450.0, 650.0));
        // Strided wavelengths are 400, 500, 600, 700; the window keeps 500 and 600.
        let wls: Vec<f64> = labels.iter().map(|a| a.wavelength).collect();
        assert_eq!(wls, vec![500.0, 600.0]);
    }

    #[test]
    fn gamut_view_distinguishes_error_kinds() {
        let params = GamutParams {
            resolution: 8,
            x_range: (0.0, 0.8),
            y_range: (0.0, 0.9),
            sum_epsilon: chromaticity::GAMUT_SUM_EPSILON,
            annotation_stride: 10,
            annotation_window: (450.0, 650.0),
        };
        let converter = ColorConverter::default();

        let dark: Vec<SpectralSample> = (0..5)
            .map(|i| SpectralSample {
                wavelength: 500.0 + i as f64,
                tristimulus: [0.0, 0.0, 0.0],
            })
            .collect();
        assert_eq!(
            gamut_view(&dark, &params, &converter).unwrap_err(),
            GamutError::AllSamplesInvalid { total: 5 }
        );

        let sparse = vec![
            SpectralSample {
                wavelength: 500.0,
                tristimulus: [1.0, 1.0, 1.0],
            },
            SpectralSample {
                wavelength: 510.0,
                tristimulus: [0.0, 0.0, 0.0],
            },
            SpectralSample {
                wavelength: 520.0,
                tristimulus: [1.0, 2.0, 1.0],
            },
        ];
        assert_eq!(
            gamut_view(&sparse, &params, &converter).unwrap_err(),
            GamutError::DegenerateSampleSet { valid: 2 }
        );
    }

    #[test]
    fn gamut_view_happy_path() {
        let params = GamutParams {
            resolution: 8,
            x_range: (0.0, 0.8),
            y_range: (0.0, 0.9),
            sum_epsilon: chromaticity::GAMUT_SUM_EPSILON,
            annotation_stride: 1,
            annotation_window: (0.0, 1000.0),
        };
        let samples = vec![
            SpectralSample {
                wavelength: 450.0,
                tristimulus: [1.0, 0.5, 3.0],
            },
            SpectralSample {
                wavelength: 550.0,
                tristimulus: [0.5, 2.0, 0.3],
            },
            SpectralSample {
                wavelength: 650.0,
                tristimulus: [2.0, 1.0, 0.1],
            },
        ];
        let view = gamut_view(&samples, &params, &ColorConverter::default()).unwrap();
        assert_eq!(view.polygon.vertices().len(), 3);
        assert_eq!(view.raster.pixels.len(), 64);
        assert_eq!(view.annotations.len(), 3);
    }
}
