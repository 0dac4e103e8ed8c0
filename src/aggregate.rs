// aggregate.rs - Fractional configuration variables

use serde::Serialize;
use tracing::debug;

use crate::lattice::Lattice;

/// Raw site tallies of the left-anchored codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodeCounts {
    pub y: [usize; 3],
    pub w: [usize; 3],
    pub z: [usize; 6],
    pub sites: usize,
}

impl CodeCounts {
    pub fn tally(lattice: &Lattice) -> Self {
        let mut counts = Self { sites: lattice.len(), ..Self::default() };
        for site in lattice.sites() {
            counts.y[site.codes.y_left.slot()] += 1;
            counts.w[site.codes.w_left.slot()] += 1;
            counts.z[site.codes.z_left.slot()] += 1;
        }
        counts
    }
}

/// The twelve fractions `(y1, y2, y3, w1, w2, w3, z1..z6)`.
///
/// Mixed codes (`y2`, `w2`, `z2`, `z5`) hold the raw tally, i.e. both mirror
/// orientations counted together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ConfigVars {
    pub y: [f64; 3],
    pub w: [f64; 3],
    pub z: [f64; 6],
}

impl ConfigVars {
    pub fn from_counts(counts: &CodeCounts) -> Self {
        let total = counts.sites as f64;
        let frac = |c: usize| c as f64 / total;
        Self {
            y: counts.y.map(frac),
            w: counts.w.map(frac),
            z: counts.z.map(frac),
        }
    }

    /// Build from the flat 12-tuple order.
    pub fn from_array(v: [f64; 12]) -> Self {
        Self {
            y: [v[0], v[1], v[2]],
            w: [v[3], v[4], v[5]],
            z: [v[6], v[7], v[8], v[9], v[10], v[11]],
        }
    }

    pub fn to_array(&self) -> [f64; 12] {
        let mut out = [0.0; 12];
        out[..3].copy_from_slice(&self.y);
        out[3..6].copy_from_slice(&self.w);
        out[6..].copy_from_slice(&self.z);
        out
    }

    pub fn sum_y(&self) -> f64 {
        self.y.iter().sum()
    }

    pub fn sum_w(&self) -> f64 {
        self.w.iter().sum()
    }

    pub fn sum_z(&self) -> f64 {
        self.z.iter().sum()
    }
}

/// Tally every site's `y_left`, `w_left` and `z_left` codes and normalise by `M*N`.
pub fn aggregate(lattice: &Lattice) -> ConfigVars {
    let counts = CodeCounts::tally(lattice);
    let vars = ConfigVars::from_counts(&counts);
    debug!(
        y = ?counts.y,
        w = ?counts.w,
        z = ?counts.z,
        "configuration variables tallied"
    );
    vars
}
