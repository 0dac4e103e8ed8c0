// src/bin/swap_scan.rs - Negative-entropy change for every admissible swap

use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use csv::WriterBuilder;
use cvm1d::aggregate::aggregate;
use cvm1d::config::{PatternSpec, RunConfig};
use cvm1d::lattice::Lattice;
use cvm1d::mutate::swap_two_sites;
use cvm1d::thermo::neg_entropy;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Cli {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random pattern seed (overrides the configured pattern)
    #[arg(long)]
    seed: Option<u64>,

    /// Fraction of A sites for --seed
    #[arg(long, default_value = "0.5")]
    density: f64,

    /// Output CSV
    #[arg(long, default_value = "swap_scan.csv")]
    output: PathBuf,
}

/// Row written to CSV.
#[derive(Debug, Serialize)]
struct Row {
    first_row: usize,
    first_col: usize,
    second_row: usize,
    second_col: usize,
    neg_entropy: f64,
    delta: f64,
}

/// All index pairs `i < j` whose activations differ.
fn admissible_pairs(lattice: &Lattice) -> Vec<(usize, usize)> {
    let sites = lattice.sites();
    let mut pairs = Vec::new();
    for i in 0..sites.len() {
        for j in (i + 1)..sites.len() {
            if sites[i].activation != sites[j].activation {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut cfg = match &cli.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(seed) = cli.seed {
        cfg.pattern = PatternSpec::Random { seed, density: cli.density };
    }

    // ------------------------------------------------------------
    let lattice = cfg.build_lattice()?;
    let base = neg_entropy(&aggregate(&lattice), cfg.zero_log)?;
    let pairs = admissible_pairs(&lattice);
    info!(sites = lattice.len(), pairs = pairs.len(), base, "scanning swaps");

    let bar = ProgressBar::new(pairs.len() as u64);
    bar.set_style(ProgressStyle::with_template(
        " {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}]",
    )?);

    let skipped = Mutex::new(0usize);
    let shape = lattice.shape();

    let mut rows: Vec<Row> = pairs
        .par_iter()
        .filter_map(|&(i, j)| {
            let result = swap_two_sites(&lattice, i, j)
                .and_then(|revised| neg_entropy(&aggregate(&revised), cfg.zero_log));
            bar.inc(1);
            match result {
                Ok(value) => {
                    let (first_row, first_col) = shape.position(i);
                    let (second_row, second_col) = shape.position(j);
                    Some(Row {
                        first_row, first_col, second_row, second_col,
                        neg_entropy: value,
                        delta: value - base,
                    })
                }
                Err(err) => {
                    warn!(i, j, %err, "swap skipped");
                    if let Ok(mut n) = skipped.lock() {
                        *n += 1;
                    }
                    None
                }
            }
        })
        .collect();
    bar.finish();

    // ------------------------------------------------------------
    // Largest entropy decrease first; ties keep index order.
    rows.sort_by(|a, b| {
        a.delta
            .total_cmp(&b.delta)
            .then((a.first_row, a.first_col, a.second_row, a.second_col)
                .cmp(&(b.first_row, b.first_col, b.second_row, b.second_col)))
    });

    let mut wtr = WriterBuilder::new().from_path(&cli.output)?;
    for r in &rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;

    let skipped = skipped.into_inner().unwrap_or_else(|e| e.into_inner());
    println!("Base neg-entropy: {base:.3}");
    if let Some(best) = rows.first() {
        println!(
            "Lowest neg-entropy swap: ({},{}) <-> ({},{}) gives {:.3} (delta {:+.3})",
            best.first_row, best.first_col, best.second_row, best.second_col,
            best.neg_entropy, best.delta
        );
    }
    println!("{} swaps evaluated, {} skipped → {}", rows.len(), skipped, cli.output.display());
    Ok(())
}
