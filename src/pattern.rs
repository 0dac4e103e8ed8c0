//! Activation patterns: injectable `(row, col) -> {0, 1}` rules used to
//! populate a freshly built lattice.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::error::{CvmError, Result};
use crate::lattice::{STATE_A, STATE_B};

/// Anything that can assign an activation to a grid position.
pub trait ActivationPattern {
    fn activation(&self, row: usize, col: usize) -> u8;
}

impl<F> ActivationPattern for F
where
    F: Fn(usize, usize) -> u8,
{
    fn activation(&self, row: usize, col: usize) -> u8 {
        self(row, col)
    }
}

/// Per-row lists of half-open column bands `[start, end)` set to state A.
///
/// Rows beyond the table reuse it cyclically; columns beyond the grid are
/// simply never asked for.
///
/// Deserialisation goes through [`BandPattern::new`], so a loaded table is
/// validated the same way as one built in code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<(usize, usize)>>", into = "Vec<Vec<(usize, usize)>>")]
pub struct BandPattern {
    rows: Vec<Vec<(usize, usize)>>,
}

impl BandPattern {
    pub fn new(rows: Vec<Vec<(usize, usize)>>) -> Result<Self> {
        if rows.is_empty() {
            return Err(CvmError::configuration("band pattern needs at least one row"));
        }
        for (r, bands) in rows.iter().enumerate() {
            if let Some(&(start, end)) = bands.iter().find(|(s, e)| s >= e) {
                return Err(CvmError::configuration(format!(
                    "row {r}: band [{start}, {end}) is empty"
                )));
            }
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Vec<(usize, usize)>] {
        &self.rows
    }

    /// The hand-picked 12-column reference pattern: three bands of three
    /// columns on the even row, single columns at the band starts on the
    /// odd row.
    pub fn reference() -> Self {
        Self {
            rows: vec![
                vec![(0, 3), (4, 7), (8, 11)],
                vec![(0, 1), (4, 5), (8, 9)],
            ],
        }
    }
}

impl ActivationPattern for BandPattern {
    fn activation(&self, row: usize, col: usize) -> u8 {
        let active = row
            .checked_rem(self.rows.len())
            .and_then(|r| self.rows.get(r))
            .is_some_and(|bands| bands.iter().any(|&(start, end)| (start..end).contains(&col)));
        if active {
            STATE_A
        } else {
            STATE_B
        }
    }
}

impl TryFrom<Vec<Vec<(usize, usize)>>> for BandPattern {
    type Error = CvmError;

    fn try_from(rows: Vec<Vec<(usize, usize)>>) -> Result<Self> {
        Self::new(rows)
    }
}

impl From<BandPattern> for Vec<Vec<(usize, usize)>> {
    fn from(pattern: BandPattern) -> Self {
        pattern.rows
    }
}

/// Independent Bernoulli activations, reproducible from a seed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomPattern {
    seed: u64,
    density: f64,
}

impl RandomPattern {
    pub fn new(seed: u64, density: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&density) {
            return Err(CvmError::configuration(format!(
                "density {density} must lie in [0, 1]"
            )));
        }
        Ok(Self { seed, density })
    }

    /// Per-site RNG so the draw depends only on `(seed, row, col)`.
    fn site_rng(&self, row: usize, col: usize) -> ChaCha20Rng {
        let site = ((row as u64) << 32) | col as u64;
        let mut x = self.seed ^ site.wrapping_mul(0x9E3779B97F4A7C15);
        x = (x ^ (x >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        x = (x ^ (x >> 27)).wrapping_mul(0x94D049BB133111EB);
        x ^= x >> 31;
        ChaCha20Rng::seed_from_u64(x)
    }
}

impl ActivationPattern for RandomPattern {
    fn activation(&self, row: usize, col: usize) -> u8 {
        if self.site_rng(row, col).gen_bool(self.density) {
            STATE_A
        } else {
            STATE_B
        }
    }
}
