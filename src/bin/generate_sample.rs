//! Generate a synthetic spectral tristimulus scan for testing the viewer.
//!
//! A Gaussian-mixture spectral power distribution is sampled over
//! 380–780 nm and weighted by a multi-lobe Gaussian fit of the CIE 1931
//! standard observer to produce plausible wavelength,X,Y,Z rows.
//!
//! Usage: `generate_sample [output.csv|output.parquet]`

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::Float64Array;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// One lobe of the Wyman–Sloan observer fit: a Gaussian with different
/// widths on each side of the peak.
fn lobe(wavelength: f64, amplitude: f64, mu: f64, sigma_lo: f64, sigma_hi: f64) -> f64 {
    let sigma = if wavelength < mu { sigma_lo } else { sigma_hi };
    amplitude * (-0.5 * ((wavelength - mu) / sigma).powi(2)).exp()
}

/// Multi-lobe Gaussian approximations of the CIE 1931 2° observer.
fn observer(wavelength: f64) -> [f64; 3] {
    let x_bar = lobe(wavelength, 1.056, 599.8, 37.9, 31.0)
        + lobe(wavelength, 0.362, 442.0, 16.0, 26.7)
        - lobe(wavelength, 0.065, 501.1, 20.4, 26.2);
    let y_bar =
        lobe(wavelength, 0.821, 568.8, 46.9, 40.5) + lobe(wavelength, 0.286, 530.9, 16.3, 31.1);
    let z_bar =
        lobe(wavelength, 1.217, 437.0, 11.8, 36.0) + lobe(wavelength, 0.681, 459.0, 26.0, 13.8);
    [x_bar, y_bar, z_bar]
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// A row of the generated table.
struct Row {
    wavelength: f64,
    x: f64,
    y: f64,
    z: f64,
}

fn generate_rows(rng: &mut SimpleRng) -> Vec<Row> {
    // Emission peaks of the synthetic source: (center nm, width, amplitude).
    let peaks = [
        (460.0, 25.0, 0.9),
        (545.0, 35.0, 1.2),
        (640.0, 30.0, 0.7),
    ];
    let noise_level = 0.002;

    (0..=80)
        .map(|i| {
            let wavelength = 380.0 + 5.0 * i as f64;
            let spd: f64 = peaks
                .iter()
                .map(|&(mu, sigma, amp)| gaussian(wavelength, mu, sigma, amp))
                .sum();
            let [x_bar, y_bar, z_bar] = observer(wavelength);
            // Irradiance-weighted tristimulus, clipped to non-negative.
            let mut sample = |bar: f64| (spd * bar + rng.gauss(0.0, noise_level)).max(0.0);
            Row {
                wavelength,
                x: sample(x_bar),
                y: sample(y_bar),
                z: sample(z_bar),
            }
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .context("creating CSV file")?;
    for row in rows {
        writer.write_record(&[
            format!("{:.1}", row.wavelength),
            format!("{:.6}", row.x),
            format!("{:.6}", row.y),
            format!("{:.6}", row.z),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("wavelength", DataType::Float64, false),
        Field::new("x", DataType::Float64, false),
        Field::new("y", DataType::Float64, false),
        Field::new("z", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.wavelength).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.x).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.y).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.z).collect::<Vec<_>>(),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_spectrum.csv".to_string());
    let path = Path::new(&path);

    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng);

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => write_csv(path, &rows)?,
        "parquet" | "pq" => write_parquet(path, &rows)?,
        other => bail!("Unsupported output extension: .{other} (use .csv or .parquet)"),
    }

    log::info!("Wrote {} rows to {}", rows.len(), path.display());
    println!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observer_peaks_land_in_the_right_bands() {
        // z̄ dominates in the blue, ȳ in the green, x̄ in the red.
        let blue = observer(445.0);
        assert!(blue[2] > blue[0] && blue[2] > blue[1]);
        let green = observer(555.0);
        assert!(green[1] > green[2]);
        let red = observer(620.0);
        assert!(red[0] > red[2]);
    }

    #[test]
    fn generated_rows_are_non_negative_and_ordered() {
        let mut rng = SimpleRng::new(42);
        let rows = generate_rows(&mut rng);
        assert_eq!(rows.len(), 81);
        for pair in rows.windows(2) {
            assert!(pair[1].wavelength > pair[0].wavelength);
        }
        for row in &rows {
            assert!(row.x >= 0.0 && row.y >= 0.0 && row.z >= 0.0);
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generate_rows(&mut SimpleRng::new(42));
        let b = generate_rows(&mut SimpleRng::new(42));
        assert_eq!(a.len(), b.len());
        for (ra, rb) in a.iter().zip(&b) {
            assert_eq!(ra.x, rb.x);
            assert_eq!(ra.y, rb.y);
            assert_eq!(ra.z, rb.z);
        }
    }
}
