// ---------------------------------------------------------------------------
// XYZ → linear RGB → sRGB conversion
// ---------------------------------------------------------------------------

/// A display color with all channels clamped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Quantize to 8-bit channels for texture upload.
    pub fn to_u8(self) -> [u8; 3] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
        ]
    }
}

/// XYZ → linear sRGB matrix for D65-referenced sRGB primaries (row-major).
pub const XYZ_TO_LINEAR_SRGB: [[f64; 3]; 3] = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

/// Converts tristimulus triples to display colors.
///
/// The conversion matrix is injected at construction so alternate RGB
/// primaries can be supported without code change; [`Default`] is the
/// standard sRGB/D65 basis.
#[derive(Debug, Clone)]
pub struct ColorConverter {
    matrix: [[f64; 3]; 3],
}

impl Default for ColorConverter {
    fn default() -> Self {
        ColorConverter::new(XYZ_TO_LINEAR_SRGB)
    }
}

impl ColorConverter {
    pub fn new(matrix: [[f64; 3]; 3]) -> Self {
        ColorConverter { matrix }
    }

    /// XYZ → linear RGB: matrix multiply, then clamp each channel to [0, 1].
    ///
    /// Out-of-range inputs (negative or huge tristimulus values) are
    /// clamped away, never rejected.
    pub fn xyz_to_linear_rgb(&self, xyz: [f64; 3]) -> Rgb {
        let channel = |row: &[f64; 3]| {
            (row[0] * xyz[0] + row[1] * xyz[1] + row[2] * xyz[2]).clamp(0.0, 1.0)
        };
        Rgb {
            r: channel(&self.matrix[0]),
            g: channel(&self.matrix[1]),
            b: channel(&self.matrix[2]),
        }
    }

    /// Full pipeline: XYZ → linear RGB → gamma-encoded sRGB.
    pub fn srgb_from_xyz(&self, xyz: [f64; 3]) -> Rgb {
        let lin = self.xyz_to_linear_rgb(xyz);
        Rgb {
            r: linear_to_srgb(lin.r),
            g: linear_to_srgb(lin.g),
            b: linear_to_srgb(lin.b),
        }
    }
}

/// The sRGB transfer function (inverse EOTF), applied per channel.
///
/// `12.92·v` below the linear toe, `1.055·v^(1/2.4) − 0.055` above it.
/// The threshold and exponent are the exact standard constants; result
/// is clamped to [0, 1].
pub fn linear_to_srgb(linear: f64) -> f64 {
    let v = if linear <= 0.0031308 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    };
    v.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() < eps, "{a} != {b} (eps {eps})");
    }

    #[test]
    fn srgb_endpoints() {
        assert_close(linear_to_srgb(0.0), 0.0, 1e-12);
        assert_close(linear_to_srgb(1.0), 1.0, 1e-12);
    }

    #[test]
    fn srgb_known_values() {
        // Linear toe: 12.92 * v
        assert_close(linear_to_srgb(0.002), 0.02584, 1e-9);
        // Just past the threshold the two branches agree to ~1e-4
        assert_close(linear_to_srgb(0.0031308), 0.04045, 1e-4);
        // 18% gray
        assert_close(linear_to_srgb(0.18), 0.46136, 1e-4);
    }

    #[test]
    fn srgb_in_range_and_monotone() {
        let mut prev = -1.0;
        for i in 0..=1000 {
            let v = i as f64 / 1000.0;
            let s = linear_to_srgb(v);
            assert!((0.0..=1.0).contains(&s), "out of range at {v}: {s}");
            assert!(s >= prev, "not monotone at {v}");
            prev = s;
        }
    }

    #[test]
    fn srgb_clamps_out_of_range_input() {
        assert_close(linear_to_srgb(-0.5), 0.0, 1e-12);
        assert_close(linear_to_srgb(7.0), 1.0, 1e-12);
    }

    #[test]
    fn d65_white_maps_to_rgb_white() {
        let conv = ColorConverter::default();
        let white = conv.xyz_to_linear_rgb([0.95047, 1.0, 1.08883]);
        assert_close(white.r, 1.0, 1e-3);
        assert_close(white.g, 1.0, 1e-3);
        assert_close(white.b, 1.0, 1e-3);
    }

    #[test]
    fn negative_channels_clamp_to_zero() {
        let conv = ColorConverter::default();
        // Spectral green: the matrix drives r negative, clamp catches it.
        let c = conv.xyz_to_linear_rgb([0.1, 0.8, 0.1]);
        assert!(c.r >= 0.0 && c.g >= 0.0 && c.b >= 0.0);
        assert!(c.r <= 1.0 && c.g <= 1.0 && c.b <= 1.0);
    }

    #[test]
    fn rgb_quantization() {
        assert_eq!(Rgb::WHITE.to_u8(), [255, 255, 255]);
        let half = Rgb {
            r: 0.5,
            g: 0.0,
            b: 1.0,
        };
        assert_eq!(half.to_u8(), [128, 0, 255]);
    }
}
