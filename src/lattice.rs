// lattice.rs - Toroidal two-row lattice of binary sites

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{classify, SiteCodes};
use crate::error::{CvmError, Result};
use crate::neighbors::Neighbors;
use crate::pattern::ActivationPattern;

/// Activation of a site in state A.
pub const STATE_A: u8 = 1;
/// Activation of a site in state B.
pub const STATE_B: u8 = 0;

/// Grid dimensions: `m` columns by `n` rows, `n` even.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatticeShape {
    pub m: usize,
    pub n: usize,
}

impl LatticeShape {
    /// Validate dimensions. Rows are paired for the diagonal wrap, so `n`
    /// must be even; neither dimension may be zero.
    pub fn new(m: usize, n: usize) -> Result<Self> {
        if m == 0 || n == 0 {
            return Err(CvmError::configuration(format!(
                "grid must be non-empty, got {m} columns x {n} rows"
            )));
        }
        if n % 2 != 0 {
            return Err(CvmError::configuration(format!(
                "row count {n} is odd; rows must pair up for the diagonal wrap"
            )));
        }
        if m.checked_mul(n).is_none() {
            return Err(CvmError::configuration(format!(
                "grid of {m} columns x {n} rows has too many sites to index"
            )));
        }
        Ok(Self { m, n })
    }

    /// Total number of sites, `M*N`.
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.m * self.n
    }

    /// Row-major index of `(row, col)`.
    #[inline(always)]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.m + col
    }

    /// `(row, col)` of a row-major index.
    #[inline(always)]
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.m, index % self.m)
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.n && col < self.m
    }
}

/// One lattice site: fixed identity, activation, and its derived codes.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub index: usize,
    pub row: usize,
    pub col: usize,
    pub activation: u8,
    pub codes: SiteCodes,
}

impl Site {
    #[inline(always)]
    pub fn is_a(&self) -> bool {
        self.activation == STATE_A
    }
}

/// An `M x N` zigzag lattice that owns its sites exclusively.
///
/// Codes are always consistent with activations: every constructor runs the
/// classifier, and nothing mutates an activation in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    shape: LatticeShape,
    sites: Vec<Site>,
}

impl Lattice {
    /// Build all `M*N` sites in row-major order and fill activations from
    /// `pattern`.
    pub fn build(shape: LatticeShape, pattern: &impl ActivationPattern) -> Result<Self> {
        let shape = LatticeShape::new(shape.m, shape.n)?;
        let mut activations = vec![STATE_B; shape.size()];
        for (index, slot) in activations.iter_mut().enumerate() {
            let (row, col) = shape.position(index);
            *slot = pattern.activation(row, col);
        }
        Self::from_activations(shape, activations)
    }

    /// Build directly from a row-major activation array.
    pub fn from_activations(shape: LatticeShape, activations: Vec<u8>) -> Result<Self> {
        let shape = LatticeShape::new(shape.m, shape.n)?;
        if activations.len() != shape.size() {
            return Err(CvmError::configuration(format!(
                "expected {} activations, got {}",
                shape.size(),
                activations.len()
            )));
        }
        if let Some(pos) = activations.iter().position(|&a| a > STATE_A) {
            return Err(CvmError::configuration(format!(
                "activation at site {pos} is {}, must be 0 or 1",
                activations[pos]
            )));
        }

        let codes = classify(shape, &activations);
        let sites = activations
            .into_iter()
            .zip(codes)
            .enumerate()
            .map(|(index, (activation, codes))| {
                let (row, col) = shape.position(index);
                Site { index, row, col, activation, codes }
            })
            .collect::<Vec<_>>();

        debug!(
            columns = shape.m,
            rows = shape.n,
            active = sites.iter().filter(|s| s.is_a()).count(),
            "lattice built"
        );
        Ok(Self { shape, sites })
    }

    #[inline(always)]
    pub fn shape(&self) -> LatticeShape {
        self.shape
    }

    /// Number of sites.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn site(&self, index: usize) -> Option<&Site> {
        self.sites.get(index)
    }

    pub fn site_at(&self, row: usize, col: usize) -> Option<&Site> {
        if self.shape.contains(row, col) {
            self.sites.get(self.shape.index(row, col))
        } else {
            None
        }
    }

    /// Row-major activation array.
    pub fn activations(&self) -> Vec<u8> {
        self.sites.iter().map(|s| s.activation).collect()
    }

    /// Neighbour indices of site `index`.
    pub fn neighbors(&self, index: usize) -> Option<Neighbors> {
        self.site(index)
            .map(|s| Neighbors::of(s.index, s.row, s.col, self.shape))
    }

    /// Re-run the classifier over the current activations.
    pub fn reclassify(&mut self) {
        let activations = self.activations();
        for (site, codes) in self.sites.iter_mut().zip(classify(self.shape, &activations)) {
            site.codes = codes;
        }
    }

    /// Copy with two activations exchanged and codes recomputed.
    pub(crate) fn with_exchanged(&self, i1: usize, i2: usize) -> Result<Self> {
        let mut activations = self.activations();
        activations.swap(i1, i2);
        Self::from_activations(self.shape, activations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_rejects_odd_and_empty() {
        assert!(matches!(LatticeShape::new(12, 3), Err(CvmError::Configuration(_))));
        assert!(matches!(LatticeShape::new(0, 2), Err(CvmError::Configuration(_))));
        assert!(matches!(LatticeShape::new(4, 0), Err(CvmError::Configuration(_))));
        assert!(LatticeShape::new(12, 4).is_ok());
    }

    #[test]
    fn test_shape_rejects_overflow() {
        let res = LatticeShape::new(usize::MAX / 2 + 1, 2);
        assert!(matches!(res, Err(CvmError::Configuration(_))), "got {:?}", res);
        assert!(matches!(LatticeShape::new(usize::MAX, 4), Err(CvmError::Configuration(_))));
        assert_eq!(LatticeShape::new(usize::MAX / 2, 2).unwrap().size(), usize::MAX - 1);
    }

    #[test]
    fn test_from_activations_validates_values() {
        let shape = LatticeShape::new(2, 2).unwrap();
        assert!(Lattice::from_activations(shape, vec![0, 1, 2, 0]).is_err());
        assert!(Lattice::from_activations(shape, vec![0, 1, 0]).is_err());
        assert!(Lattice::from_activations(shape, vec![0, 1, 1, 0]).is_ok());
    }

    #[test]
    fn test_site_at_respects_bounds() {
        let shape = LatticeShape::new(3, 2).unwrap();
        let lattice = Lattice::from_activations(shape, vec![1, 0, 0, 0, 0, 1]).unwrap();
        assert_eq!(lattice.site_at(1, 2).map(|s| s.index), Some(5));
        assert!(lattice.site_at(2, 0).is_none());
        assert!(lattice.site_at(0, 3).is_none());
    }
}
