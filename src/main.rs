//! 1-D CVM report for a zigzag lattice, optionally compared against a copy
//! with two sites swapped (see `RunConfig` for all run parameters).

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::Parser;
use cvm1d::aggregate::aggregate;
use cvm1d::analysis::Analysis;
use cvm1d::config::{PatternSpec, RunConfig};
use cvm1d::error::CvmError;
use cvm1d::lattice::Lattice;
use cvm1d::mutate::{comparison_overlay, swap_two_sites};
use cvm1d::report;
use cvm1d::select::{prompt_site, SiteSelection};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "1-D Cluster Variation Method on a two-row zigzag lattice")]
struct Cli {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of columns (overrides config)
    #[arg(long)]
    columns: Option<usize>,

    /// Number of rows, must be even (overrides config)
    #[arg(long)]
    rows: Option<usize>,

    /// Use a random pattern with this seed instead of the configured one
    #[arg(long)]
    seed: Option<u64>,

    /// Fraction of A sites for --seed
    #[arg(long, default_value = "0.5")]
    density: f64,

    /// Swap two sites given as row1,col1,row2,col2
    #[arg(long, value_delimiter = ',')]
    swap: Option<Vec<i64>>,

    /// Prompt for the two sites to swap on stdin
    #[arg(long, conflicts_with = "swap")]
    interactive: bool,

    /// Write the free-energy sweep (of the revised lattice if any) to CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the flattened comparison overlay
    #[arg(long)]
    overlay: bool,

    /// Debug-level logging
    #[arg(long, short)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<RunConfig, CvmError> {
    let mut cfg = match &cli.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(columns) = cli.columns {
        cfg.columns = columns;
    }
    if let Some(rows) = cli.rows {
        cfg.rows = rows;
    }
    if let Some(seed) = cli.seed {
        cfg.pattern = PatternSpec::Random { seed, density: cli.density };
    }
    Ok(cfg)
}

/// Pick the two swap sites, either from `--swap` or interactively.
/// `None` means the run continues without a swap.
fn choose_sites(cli: &Cli, cfg: &RunConfig, lattice: &Lattice) -> Result<Option<(usize, usize)>, CvmError> {
    let shape = lattice.shape();
    if let Some(v) = &cli.swap {
        if v.len() != 4 {
            return Err(CvmError::configuration("--swap expects row1,col1,row2,col2"));
        }
        let first = SiteSelection::new(v[0], v[1]).index(shape)?;
        let second = SiteSelection::new(v[2], v[3]).index(shape)?;
        return Ok(Some((first, second)));
    }
    if !cli.interactive {
        return Ok(None);
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    println!("\nYou can select two nodes to swap; these should be one ON node and one OFF node");
    println!("\n  First node:");
    let first = match prompt_site(&mut input, &mut output, shape, cfg.max_retries) {
        Ok(sel) => sel.index(shape)?,
        Err(CvmError::SelectionAbandoned { attempts }) => {
            warn!(attempts, "first selection abandoned, continuing without a swap");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };
    println!("\n  Second node (different activation from the first):");
    let second = match prompt_site(&mut input, &mut output, shape, cfg.max_retries) {
        Ok(sel) => sel.index(shape)?,
        Err(CvmError::SelectionAbandoned { attempts }) => {
            warn!(attempts, "second selection abandoned, continuing without a swap");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };
    Ok(Some((first, second)))
}

fn print_lattice(title: &str, lattice: &Lattice) {
    println!("{}", "-".repeat(70));
    println!("  *** {title} ***");
    println!("{}", "-".repeat(70));
    print!("{}", report::site_table(lattice));
    println!("\nVisual depiction (wrap-around of first column shown at far right)\n");
    print!("{}", report::ascii_grid(lattice));
}

/// Print the configuration-variable table and negative entropy. A numeric
/// domain failure is reported in place of the entropy line.
fn report_analysis(grid: &str, label: &str, lattice: &Lattice, cfg: &RunConfig) -> Option<Analysis> {
    println!();
    print!("{}", report::config_vars_table(
        &format!("Fractional Configuration Variable Values for the {grid} Grid"),
        &aggregate(lattice),
    ));
    match Analysis::of(lattice, cfg.zero_log, cfg.sweep) {
        Ok(analysis) => {
            println!("{}", report::neg_entropy_line(label, analysis.neg_entropy));
            Some(analysis)
        }
        Err(err) => {
            warn!(%err, grid, "entropy undefined");
            println!("  Neg-Entropy for the {label} system is undefined: {err}");
            None
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // ------------------------------------------------------------
    let cfg = resolve_config(&cli)?;
    info!(columns = cfg.columns, rows = cfg.rows, pattern = ?cfg.pattern, "configuration");

    let original = cfg.build_lattice()?;
    print_lattice("Node values for the original grid", &original);

    let revised = match choose_sites(&cli, &cfg, &original)? {
        Some((i1, i2)) => match swap_two_sites(&original, i1, i2) {
            Ok(lattice) => {
                print_lattice("Node values for the revised grid", &lattice);
                Some((lattice, i1, i2))
            }
            Err(err @ CvmError::SwapRejected { .. }) => {
                println!("\nThe two nodes do NOT have different activations: {err}");
                None
            }
            Err(err) => return Err(err.into()),
        },
        None => None,
    };

    // ------------------------------------------------------------
    let base = report_analysis("Original", "original", &original, &cfg);
    let mut sweep = base.map(|a| a.sweep);

    if let Some((lattice, i1, i2)) = &revised {
        if let Some(next) = report_analysis("Revised", "revised", lattice, &cfg) {
            sweep = Some(next.sweep);
        }
        if cli.overlay {
            let overlay = comparison_overlay(&original, lattice, *i1, *i2);
            let text: Vec<String> = overlay.iter().map(u8::to_string).collect();
            println!("\nOverlay: {}", text.join(" "));
        }
    }

    let Some(sweep) = sweep else {
        println!("\nNo free-energy sweep: negative entropy is undefined.");
        return Ok(());
    };

    println!();
    print!("{}", report::free_energy_table(&sweep));

    if let Some(path) = &cli.csv {
        let file = BufWriter::new(File::create(path)?);
        report::write_sweep_csv(file, &sweep)?;
        println!("Sweep written → {}", path.display());
    }

    Ok(())
}
