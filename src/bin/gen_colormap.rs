//! Serialize named color lookup tables into a static-constant Rust
//! source file, for embedding in other programs.
//!
//! Each map is defined by evenly spaced RGB anchor colors and expanded
//! to 256 entries by linear interpolation. The emitted module contains
//! one `[[u8; 3]; 256]` table per map plus a name → table lookup that
//! falls back to the first map for unknown names.
//!
//! Usage: `gen_colormap [colormaps.rs]`

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

const TABLE_SIZE: usize = 256;

/// Anchor colors (0..1 RGB), sampled uniformly along each map.
const COLORMAPS: &[(&str, &[[f64; 3]])] = &[
    (
        "viridis",
        &[
            [0.267, 0.005, 0.329],
            [0.283, 0.141, 0.458],
            [0.254, 0.265, 0.530],
            [0.207, 0.372, 0.553],
            [0.164, 0.471, 0.558],
            [0.128, 0.567, 0.551],
            [0.135, 0.659, 0.518],
            [0.267, 0.749, 0.441],
            [0.478, 0.821, 0.318],
            [0.741, 0.873, 0.150],
            [0.993, 0.906, 0.144],
        ],
    ),
    (
        "plasma",
        &[
            [0.050, 0.030, 0.528],
            [0.287, 0.011, 0.627],
            [0.417, 0.001, 0.658],
            [0.563, 0.052, 0.641],
            [0.693, 0.165, 0.564],
            [0.798, 0.280, 0.470],
            [0.881, 0.392, 0.383],
            [0.949, 0.517, 0.295],
            [0.988, 0.653, 0.211],
            [0.988, 0.809, 0.145],
            [0.940, 0.975, 0.131],
        ],
    ),
    (
        "inferno",
        &[
            [0.001, 0.000, 0.014],
            [0.088, 0.036, 0.227],
            [0.258, 0.039, 0.406],
            [0.416, 0.090, 0.433],
            [0.578, 0.148, 0.404],
            [0.735, 0.215, 0.330],
            [0.866, 0.317, 0.226],
            [0.955, 0.471, 0.106],
            [0.988, 0.645, 0.040],
            [0.964, 0.844, 0.273],
            [0.988, 0.998, 0.645],
        ],
    ),
    (
        "magma",
        &[
            [0.001, 0.000, 0.014],
            [0.078, 0.054, 0.218],
            [0.232, 0.059, 0.437],
            [0.390, 0.100, 0.502],
            [0.550, 0.161, 0.506],
            [0.716, 0.215, 0.475],
            [0.868, 0.288, 0.409],
            [0.968, 0.439, 0.359],
            [0.994, 0.625, 0.427],
            [0.997, 0.812, 0.572],
            [0.987, 0.991, 0.750],
        ],
    ),
    (
        "jet",
        &[
            [0.0, 0.0, 0.5],
            [0.0, 0.0, 1.0],
            [0.0, 0.5, 1.0],
            [0.0, 1.0, 1.0],
            [0.5, 1.0, 0.5],
            [1.0, 1.0, 0.0],
            [1.0, 0.5, 0.0],
            [1.0, 0.0, 0.0],
            [0.5, 0.0, 0.0],
        ],
    ),
];

/// Expand anchors to a full table by piecewise-linear interpolation.
fn expand(anchors: &[[f64; 3]]) -> Vec<[u8; 3]> {
    let segments = (anchors.len() - 1) as f64;
    (0..TABLE_SIZE)
        .map(|i| {
            let t = i as f64 / (TABLE_SIZE - 1) as f64 * segments;
            let seg = (t.floor() as usize).min(anchors.len() - 2);
            let frac = t - seg as f64;
            let mut rgb = [0u8; 3];
            for (c, slot) in rgb.iter_mut().enumerate() {
                let v = anchors[seg][c] + frac * (anchors[seg + 1][c] - anchors[seg][c]);
                *slot = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
            }
            rgb
        })
        .collect()
}

fn emit_module(out: &mut impl Write) -> Result<()> {
    writeln!(out, "// Generated by gen_colormap; do not edit.")?;
    writeln!(out)?;

    for (name, anchors) in COLORMAPS {
        let table = expand(anchors);
        writeln!(out, "/// Colormap: {name}, size={TABLE_SIZE}")?;
        writeln!(
            out,
            "pub static COLORMAP_{}: [[u8; 3]; {TABLE_SIZE}] = [",
            name.to_uppercase()
        )?;
        for (i, [r, g, b]) in table.iter().enumerate() {
            writeln!(out, "    [{r:3}, {g:3}, {b:3}], // {i}")?;
        }
        writeln!(out, "];")?;
        writeln!(out)?;
    }

    writeln!(
        out,
        "/// Look up a colormap by name; unknown names fall back to `{}`.",
        COLORMAPS[0].0
    )?;
    writeln!(
        out,
        "pub fn get_colormap(name: &str) -> &'static [[u8; 3]; {TABLE_SIZE}] {{"
    )?;
    writeln!(out, "    match name {{")?;
    for (name, _) in COLORMAPS {
        writeln!(
            out,
            "        \"{name}\" => &COLORMAP_{},",
            name.to_uppercase()
        )?;
    }
    writeln!(out, "        _ => &COLORMAP_{},", COLORMAPS[0].0.to_uppercase())?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "colormaps.rs".to_string());
    let path = Path::new(&path);

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut out = std::io::BufWriter::new(file);
    emit_module(&mut out)?;
    out.flush().context("flushing output")?;

    println!(
        "Wrote {} colormap table(s) to {}",
        COLORMAPS.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_span_their_anchor_endpoints() {
        for (name, anchors) in COLORMAPS {
            let table = expand(anchors);
            assert_eq!(table.len(), TABLE_SIZE, "{name}");
            let first = anchors[0].map(|v| (v * 255.0).round() as u8);
            let last = anchors[anchors.len() - 1].map(|v| (v * 255.0).round() as u8);
            assert_eq!(table[0], first, "{name} start");
            assert_eq!(table[TABLE_SIZE - 1], last, "{name} end");
        }
    }

    #[test]
    fn emitted_module_contains_all_tables() {
        let mut buf = Vec::new();
        emit_module(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        for (name, _) in COLORMAPS {
            assert!(text.contains(&format!("COLORMAP_{}", name.to_uppercase())));
        }
        assert!(text.contains("pub fn get_colormap"));
    }
}
