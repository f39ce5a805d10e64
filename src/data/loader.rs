use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, Float32Array, Float64Array, Int32Array, Int64Array};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{SpectralSample, SpectralScan};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a spectral scan from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – headerless rows `wavelength,X,Y,Z`
/// * `.json`    – `[{ "wavelength": w, "x": X, "y": Y, "z": Z }, ...]`
/// * `.parquet` – scalar float columns `wavelength`, `x`, `y`, `z`
pub fn load_file(path: &Path) -> Result<SpectralScan> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let samples = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    if samples.is_empty() {
        bail!("No valid data rows found in {}", path.display());
    }

    let source_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("spectrum")
        .to_string();

    Ok(SpectralScan::new(samples, source_name))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Headerless CSV, four numeric fields per row:
///
/// ```csv
/// 380.0,0.0014,0.0000,0.0065
/// 385.0,0.0022,0.0001,0.0105
/// ```
///
/// Rows with fewer than four fields or non-numeric fields are skipped
/// with a warning, so a stray header line does not abort the load.
fn load_csv(path: &Path) -> Result<Vec<SpectralSample>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;

    let mut samples = Vec::new();
    let mut skipped = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {}", row_no + 1))?;

        if record.len() < 4 {
            log::warn!("CSV row {}: fewer than 4 fields, skipping", row_no + 1);
            skipped += 1;
            continue;
        }

        let mut fields = [0.0f64; 4];
        let mut numeric = true;
        for (slot, raw) in fields.iter_mut().zip(record.iter()) {
            match raw.parse::<f64>() {
                Ok(v) => *slot = v,
                Err(_) => {
                    numeric = false;
                    break;
                }
            }
        }
        if !numeric {
            log::warn!("CSV row {}: non-numeric field, skipping", row_no + 1);
            skipped += 1;
            continue;
        }

        samples.push(SpectralSample {
            wavelength: fields[0],
            tristimulus: [fields[1], fields[2], fields[3]],
        });
    }

    if skipped > 0 {
        log::warn!("Skipped {skipped} malformed CSV row(s)");
    }
    Ok(samples)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct JsonRecord {
    wavelength: f64,
    x: f64,
    y: f64,
    z: f64,
}

/// Records-oriented JSON array, one object per sample.
fn load_json(path: &Path) -> Result<Vec<SpectralSample>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let records: Vec<JsonRecord> = serde_json::from_str(&text).context("parsing JSON")?;

    Ok(records
        .into_iter()
        .map(|r| SpectralSample {
            wavelength: r.wavelength,
            tristimulus: [r.x, r.y, r.z],
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Parquet with one row per sample and scalar numeric columns
/// `wavelength`, `x`, `y`, `z` (matched case-insensitively). Works with
/// files written by Pandas, Polars, or the bundled `generate_sample`.
fn load_parquet(path: &Path) -> Result<Vec<SpectralSample>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut samples = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &str| -> Result<&Arc<dyn Array>> {
            schema
                .fields()
                .iter()
                .position(|f| f.name().eq_ignore_ascii_case(name))
                .map(|i| batch.column(i))
                .with_context(|| format!("Parquet file missing '{name}' column"))
        };

        let wavelength_col = column("wavelength")?;
        let x_col = column("x")?;
        let y_col = column("y")?;
        let z_col = column("z")?;

        for row in 0..batch.num_rows() {
            samples.push(SpectralSample {
                wavelength: scalar_f64(wavelength_col, row)
                    .with_context(|| format!("Row {row}: 'wavelength'"))?,
                tristimulus: [
                    scalar_f64(x_col, row).with_context(|| format!("Row {row}: 'x'"))?,
                    scalar_f64(y_col, row).with_context(|| format!("Row {row}: 'y'"))?,
                    scalar_f64(z_col, row).with_context(|| format!("Row {row}: 'z'"))?,
                ],
            });
        }
    }

    Ok(samples)
}

/// Read one numeric cell as f64 from a Float64/Float32/Int64/Int32 column.
fn scalar_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value");
    }
    if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = col.as_any().downcast_ref::<Float32Array>() {
        Ok(arr.value(row) as f64)
    } else if let Some(arr) = col.as_any().downcast_ref::<Int64Array>() {
        Ok(arr.value(row) as f64)
    } else if let Some(arr) = col.as_any().downcast_ref::<Int32Array>() {
        Ok(arr.value(row) as f64)
    } else {
        bail!("column type {:?} is not numeric", col.data_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("spectrum-plot-test-{}-{name}", std::process::id()));
        p
    }

    #[test]
    fn csv_skips_malformed_rows() {
        let path = temp_path("skip.csv");
        std::fs::write(
            &path,
            "wavelength,X,Y,Z\n380.0,0.1,0.2,0.3\nbroken\n390.0,0.4,0.5,0.6\n",
        )
        .unwrap();

        let scan = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        // Header and short row are skipped; two data rows survive.
        assert_eq!(scan.len(), 2);
        assert_eq!(scan.samples[0].wavelength, 380.0);
        assert_eq!(scan.samples[1].tristimulus, [0.4, 0.5, 0.6]);
    }

    #[test]
    fn csv_with_no_valid_rows_is_an_error() {
        let path = temp_path("empty.csv");
        std::fs::write(&path, "a,b\nc,d\n").unwrap();
        let result = load_file(&path);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn json_records_load_in_order() {
        let path = temp_path("scan.json");
        std::fs::write(
            &path,
            r#"[{"wavelength": 500.0, "x": 1.0, "y": 2.0, "z": 3.0},
                {"wavelength": 510.0, "x": 4.0, "y": 5.0, "z": 6.0}]"#,
        )
        .unwrap();

        let scan = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(scan.len(), 2);
        assert_eq!(scan.samples[0].tristimulus, [1.0, 2.0, 3.0]);
        assert_eq!(scan.samples[1].wavelength, 510.0);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(load_file(Path::new("scan.xlsx")).is_err());
    }
}
