// thermo.rs - Negative entropy and the free-energy sweep
//
// Mixed configurations (y2, z2, z5) are tallied with both mirror
// orientations together; they are halved before entering x ln x and the
// degeneracy factor 2 is applied to the halved term.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::ConfigVars;
use crate::error::{CvmError, Result};

/// How a zero fraction is treated inside `x ln x`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroLogPolicy {
    /// `0 ln 0 := 0`, the combinatorial limit.
    #[default]
    Limit,
    /// Any zero fraction is a `NumericDomain` error.
    Strict,
}

/// Default number of sweep steps.
pub const SWEEP_STEPS: usize = 50;
/// Default epsilon decrement per step.
pub const SWEEP_INCREMENT: f64 = 0.01;

fn x_ln_x(term: &'static str, x: f64, policy: ZeroLogPolicy) -> Result<f64> {
    if !x.is_finite() || x < 0.0 {
        return Err(CvmError::NumericDomain { term, value: x });
    }
    if x == 0.0 {
        return match policy {
            ZeroLogPolicy::Limit => Ok(0.0),
            ZeroLogPolicy::Strict => Err(CvmError::NumericDomain { term, value: x }),
        };
    }
    Ok(x * x.ln())
}

/// Negative entropy `-2 S_y + 2 S_z`.
pub fn neg_entropy(vars: &ConfigVars, policy: ZeroLogPolicy) -> Result<f64> {
    let [y1, y2, y3] = vars.y;
    let [z1, z2, z3, z4, z5, z6] = vars.z;
    let (y2h, z2h, z5h) = (0.5 * y2, 0.5 * z2, 0.5 * z5);

    let s_y = x_ln_x("y1", y1, policy)?
        + 2.0 * x_ln_x("y2", y2h, policy)?
        + x_ln_x("y3", y3, policy)?;

    let s_z = x_ln_x("z1", z1, policy)?
        + 2.0 * x_ln_x("z2", z2h, policy)?
        + x_ln_x("z3", z3, policy)?
        + x_ln_x("z4", z4, policy)?
        + 2.0 * x_ln_x("z5", z5h, policy)?
        + x_ln_x("z6", z6, policy)?;

    let value = -2.0 * s_y + 2.0 * s_z;
    debug!(s_y, s_z, neg_entropy = value, "entropy evaluated");
    Ok(value)
}

/// Fraction of triplets carrying the interaction energy:
/// `z2/2 + z3 + z4 + z5/2`.
pub fn enthalpy_weight(vars: &ConfigVars) -> f64 {
    0.5 * vars.z[1] + vars.z[2] + vars.z[3] + 0.5 * vars.z[4]
}

/// Sweep grid for the interaction energy `epsilon = -(i * increment)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepParams {
    pub steps: usize,
    pub increment: f64,
}

impl Default for SweepParams {
    fn default() -> Self {
        Self { steps: SWEEP_STEPS, increment: SWEEP_INCREMENT }
    }
}

impl SweepParams {
    pub fn epsilons(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.steps).map(move |i| -(i as f64 * self.increment))
    }
}

/// One row of the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FreeEnergyPoint {
    pub epsilon: f64,
    pub enthalpy: f64,
    pub free_energy: f64,
}

/// The default 50-step sweep.
pub fn scan_free_energy(vars: &ConfigVars, neg_entropy: f64) -> Vec<FreeEnergyPoint> {
    scan_free_energy_with(vars, neg_entropy, SweepParams::default())
}

pub fn scan_free_energy_with(
    vars: &ConfigVars,
    neg_entropy: f64,
    params: SweepParams,
) -> Vec<FreeEnergyPoint> {
    let sum_z = enthalpy_weight(vars);
    params
        .epsilons()
        .map(|epsilon| {
            let enthalpy = epsilon * sum_z;
            FreeEnergyPoint { epsilon, enthalpy, free_energy: enthalpy + neg_entropy }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x_ln_x_domain() {
        assert_eq!(x_ln_x("t", 0.0, ZeroLogPolicy::Limit).unwrap(), 0.0);
        assert!(x_ln_x("t", 0.0, ZeroLogPolicy::Strict).is_err());
        assert!(x_ln_x("t", -0.1, ZeroLogPolicy::Limit).is_err());
        assert!(x_ln_x("t", f64::NAN, ZeroLogPolicy::Limit).is_err());
        let v = x_ln_x("t", 0.5, ZeroLogPolicy::Strict).unwrap();
        assert!((v - 0.5 * 0.5f64.ln()).abs() < 1e-15);
    }

    #[test]
    fn test_policy_parses_lowercase() {
        #[derive(Deserialize)]
        struct Wrap {
            zero_log: ZeroLogPolicy,
        }
        let w: Wrap = toml::from_str("zero_log = \"strict\"").unwrap();
        assert_eq!(w.zero_log, ZeroLogPolicy::Strict);
    }
}
