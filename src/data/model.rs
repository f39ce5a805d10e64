// ---------------------------------------------------------------------------
// SpectralSample – one row of the source table
// ---------------------------------------------------------------------------

/// One measured wavelength with its irradiance-weighted tristimulus
/// triple. Immutable once parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralSample {
    /// Wavelength in nanometers.
    pub wavelength: f64,
    /// CIE X, Y, Z irradiance values (non-negative in well-formed data).
    pub tristimulus: [f64; 3],
}

// ---------------------------------------------------------------------------
// SpectralScan – the complete loaded measurement
// ---------------------------------------------------------------------------

/// A full scan: samples in input row order (the order carries meaning
/// for trajectory plotting and annotation subsampling), plus the source
/// file name for plot titles.
#[derive(Debug, Clone)]
pub struct SpectralScan {
    pub samples: Vec<SpectralSample>,
    pub source_name: String,
}

impl SpectralScan {
    pub fn new(samples: Vec<SpectralSample>, source_name: impl Into<String>) -> Self {
        SpectralScan {
            samples,
            source_name: source_name.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// (min, max) wavelength over the scan; None when empty.
    pub fn wavelength_range(&self) -> Option<(f64, f64)> {
        let mut iter = self.samples.iter().map(|s| s.wavelength);
        let first = iter.next()?;
        let (mut lo, mut hi) = (first, first);
        for w in iter {
            lo = lo.min(w);
            hi = hi.max(w);
        }
        Some((lo, hi))
    }

    /// Largest tristimulus value across all channels, for axis scaling.
    pub fn max_tristimulus(&self) -> f64 {
        self.samples
            .iter()
            .flat_map(|s| s.tristimulus)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wavelength_range_handles_unsorted_input() {
        let scan = SpectralScan::new(
            vec![
                SpectralSample {
                    wavelength: 550.0,
                    tristimulus: [0.1, 0.2, 0.3],
                },
                SpectralSample {
                    wavelength: 380.0,
                    tristimulus: [0.0, 0.0, 0.1],
                },
                SpectralSample {
                    wavelength: 780.0,
                    tristimulus: [0.2, 0.1, 0.0],
                },
            ],
            "test.csv",
        );
        assert_eq!(scan.wavelength_range(), Some((380.0, 780.0)));
        assert!((scan.max_tristimulus() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn empty_scan() {
        let scan = SpectralScan::new(Vec::new(), "empty.csv");
        assert!(scan.is_empty());
        assert_eq!(scan.wavelength_range(), None);
    }
}
