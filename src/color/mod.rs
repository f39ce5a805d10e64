/// Colorimetry layer: pure numeric/geometric functions, no UI types.
///
/// Pipeline:
/// ```text
///   SpectralSample (X, Y, Z)
///        │
///        ▼
///   ┌──────────────┐
///   │ chromaticity  │  project onto X+Y+Z=1 → (x, y)
///   └──────────────┘
///        │
///        ├──────────────────────────────┐
///        ▼                              ▼
///   ┌──────────────┐            ┌──────────────┐
///   │   convert     │            │    gamut      │
///   │ XYZ → sRGB    │──────────▶│ raster, hull, │
///   └──────────────┘            │ mask, labels  │
///                                └──────────────┘
/// ```
///
/// Everything here is a pure function of its inputs: per-sample and
/// per-pixel steps have no cross-element dependency beyond the two
/// aggregates (normalization sum, boundary centroid), which are
/// computed before the dependent map step.

pub mod chromaticity;
pub mod convert;
pub mod gamut;
pub mod scale;
