//! Plain-text and CSV renderings of lattices and their statistics.
//! Everything here is a pure consumer of engine data.

use std::io;

use csv::WriterBuilder;

use crate::aggregate::ConfigVars;
use crate::error::Result;
use crate::lattice::Lattice;
use crate::thermo::FreeEnergyPoint;

fn rule() -> String {
    "-".repeat(70)
}

const SITE_HEADER: [&str; 8] =
    ["Col", "Activation", "wLeft", "wRight", "yLeft", "yRight", "zLeft", "nodeNum"];

/// Per-site table grouped by row.
pub fn site_table(lattice: &Lattice) -> String {
    let mut out = String::new();
    let shape = lattice.shape();
    let [h0, h1, h2, h3, h4, h5, h6, h7] = SITE_HEADER;
    for row in 0..shape.n {
        out.push_str(&format!("\nRow {row}\n"));
        out.push_str(&format!(
            "{h0:>5} {h1:>11} {h2:>7} {h3:>7} {h4:>7} {h5:>7} {h6:>7} {h7:>8}\n"
        ));
        for site in lattice.sites().iter().filter(|s| s.row == row) {
            let c = &site.codes;
            out.push_str(&format!(
                "{:>5} {:>11} {:>7} {:>7} {:>7} {:>7} {:>7} {:>8}\n",
                site.col,
                site.activation,
                c.w_left.code(),
                c.w_right.code(),
                c.y_left.code(),
                c.y_right.code(),
                c.z_left.code(),
                site.index
            ));
        }
    }
    out
}

/// Row-wise sketch: `X` for A, `-` for B, odd rows shifted right, and a
/// trailing `x`/`o` repeating column 0 to show the wrap.
pub fn ascii_grid(lattice: &Lattice) -> String {
    let mut out = String::new();
    let shape = lattice.shape();
    for row in 0..shape.n {
        out.push_str(&format!("Row {row}:  "));
        if row % 2 == 1 {
            out.push_str("  ");
        }
        for col in 0..shape.m {
            let a = lattice.site_at(row, col).map_or(false, |s| s.is_a());
            out.push_str(if a { "X  " } else { "-  " });
        }
        let wrap = lattice.site_at(row, 0).map_or(false, |s| s.is_a());
        out.push_str(if wrap { "x" } else { "o" });
        out.push('\n');
    }
    out
}

/// Right-aligned 8-wide cells separated by one space.
fn cells<I, T>(values: I) -> String
where
    I: IntoIterator<Item = T>,
    T: std::fmt::Display,
{
    let cols: Vec<String> = values.into_iter().map(|v| format!("{v:>8}")).collect();
    cols.join(" ")
}

fn numeric_cells(values: &[f64]) -> String {
    cells(values.iter().map(|v| format!("{v:.3}")))
}

/// Twelve fractions to three decimals, with the group sums.
pub fn config_vars_table(title: &str, vars: &ConfigVars) -> String {
    let lines = [
        rule(),
        format!("  *** {title} ***"),
        rule(),
        cells(["y1", "2*y2", "y3", "w1", "2*w2", "w3", "Sum y", "Sum w"]),
        numeric_cells(&[
            vars.y[0], vars.y[1], vars.y[2], vars.w[0], vars.w[1], vars.w[2],
            vars.sum_y(), vars.sum_w(),
        ]),
        cells(["z1", "2*z2", "z3", "z4", "2*z5", "z6", "Sum z"]),
        numeric_cells(&[
            vars.z[0], vars.z[1], vars.z[2], vars.z[3], vars.z[4], vars.z[5],
            vars.sum_z(),
        ]),
    ];
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn neg_entropy_line(label: &str, value: f64) -> String {
    format!("  Neg-Entropy for the {label} system is: {value:.3}")
}

/// Sweep table, one line per epsilon.
pub fn free_energy_table(points: &[FreeEnergyPoint]) -> String {
    let mut out = format!("{:>10} {:>10} {:>12}\n", "epsilon", "enthalpy", "free_energy");
    for p in points {
        out.push_str(&format!(
            "{:>10.3} {:>10.3} {:>12.3}\n",
            p.epsilon, p.enthalpy, p.free_energy
        ));
    }
    out
}

/// Write the sweep as CSV with an `epsilon,enthalpy,free_energy` header.
pub fn write_sweep_csv<W: io::Write>(writer: W, points: &[FreeEnergyPoint]) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
    for p in points {
        wtr.serialize(p)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::LatticeShape;

    #[test]
    fn test_ascii_grid_layout() {
        let shape = LatticeShape::new(3, 2).unwrap();
        let lattice = Lattice::from_activations(shape, vec![1, 0, 0, 0, 1, 0]).unwrap();
        let grid = ascii_grid(&lattice);
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines[0], "Row 0:  X  -  -  x");
        assert_eq!(lines[1], "Row 1:    -  X  -  o");
    }

    #[test]
    fn test_config_vars_table_layout() {
        let vars = ConfigVars::from_array([
            0.25, 0.5, 0.25, 0.25, 0.5, 0.25, 0.125, 0.25, 0.125, 0.125, 0.25, 0.125,
        ]);
        let table = config_vars_table("Original", &vars);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], rule());
        assert_eq!(lines[1], "  *** Original ***");
        assert_eq!(
            lines[3],
            "      y1     2*y2       y3       w1     2*w2       w3    Sum y    Sum w"
        );
        assert_eq!(
            lines[4],
            "   0.250    0.500    0.250    0.250    0.500    0.250    1.000    1.000"
        );
        assert_eq!(
            lines[6],
            "   0.125    0.250    0.125    0.125    0.250    0.125    1.000"
        );
        assert!(table.ends_with('\n'));
    }

    #[test]
    fn test_site_and_sweep_tables() {
        let shape = LatticeShape::new(2, 2).unwrap();
        let lattice = Lattice::from_activations(shape, vec![1, 0, 0, 1]).unwrap();
        let table = site_table(&lattice);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "Row 0");
        assert!(lines[2].starts_with("  Col  Activation"), "header {:?}", lines[2]);
        assert!(lines[3].starts_with("    0           1"), "row {:?}", lines[3]);
        assert_eq!(lines[6], "Row 1");
        assert!(lines[9].ends_with("       3"), "row {:?}", lines[9]);

        let points = [FreeEnergyPoint { epsilon: -0.01, enthalpy: -0.005, free_energy: -1.25 }];
        let sweep = free_energy_table(&points);
        assert_eq!(
            sweep,
            "   epsilon   enthalpy  free_energy\n    -0.010     -0.005       -1.250\n"
        );
    }

    #[test]
    fn test_sweep_csv_header() {
        let points = [FreeEnergyPoint { epsilon: 0.0, enthalpy: 0.0, free_energy: -1.5 }];
        let mut buf = Vec::new();
        write_sweep_csv(&mut buf, &points).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().next(), Some("epsilon,enthalpy,free_energy"));
        let row = text.lines().nth(1).unwrap_or_default();
        assert!(row.ends_with(",-1.5"), "unexpected row {row}");
    }
}
