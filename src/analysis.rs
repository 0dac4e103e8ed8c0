// analysis.rs - One pass of the pipeline over a classified lattice

use tracing::info;

use crate::aggregate::{aggregate, ConfigVars};
use crate::error::Result;
use crate::lattice::Lattice;
use crate::thermo::{neg_entropy, scan_free_energy_with, FreeEnergyPoint, SweepParams, ZeroLogPolicy};

/// Aggregates, entropy and sweep for one lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub vars: ConfigVars,
    pub neg_entropy: f64,
    pub sweep: Vec<FreeEnergyPoint>,
}

impl Analysis {
    pub fn of(lattice: &Lattice, policy: ZeroLogPolicy, params: SweepParams) -> Result<Self> {
        let vars = aggregate(lattice);
        let neg_entropy = neg_entropy(&vars, policy)?;
        let sweep = scan_free_energy_with(&vars, neg_entropy, params);
        info!(neg_entropy, points = sweep.len(), "analysis complete");
        Ok(Self { vars, neg_entropy, sweep })
    }
}
