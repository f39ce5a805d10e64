/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SpectralScan
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SpectralScan  │  ordered Vec<SpectralSample>
///   └──────────────┘
///        │
///        ▼
///   color pipeline (projection, raster, gamut)
/// ```

pub mod loader;
pub mod model;
