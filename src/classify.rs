// classify.rs - Per-site pair, diagonal-pair and triplet codes

use crate::lattice::{LatticeShape, STATE_A};
use crate::neighbors::Neighbors;

/// Nearest-neighbour pair code, shared by same-row (w) and diagonal (y) pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PairCode {
    /// A-A
    BothA = 1,
    /// A-B or B-A
    Mixed = 2,
    /// B-B
    BothB = 3,
}

impl PairCode {
    #[inline(always)]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Zero-based tally slot.
    #[inline(always)]
    pub fn slot(self) -> usize {
        self as usize - 1
    }
}

/// Triplet code built from a site, its left diagonal and its left
/// same-row neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TripletCode {
    Aaa = 1,
    /// A-A-B and its mirror B-A-A
    Aab = 2,
    Aba = 3,
    Bab = 4,
    /// A-B-B and its mirror B-B-A
    Abb = 5,
    Bbb = 6,
}

impl TripletCode {
    #[inline(always)]
    pub fn code(self) -> u8 {
        self as u8
    }

    #[inline(always)]
    pub fn slot(self) -> usize {
        self as usize - 1
    }
}

/// All codes derived for one site. There is deliberately no right-hand
/// triplet code; only left neighbours feed the triplet tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteCodes {
    pub w_left: PairCode,
    pub w_right: PairCode,
    pub y_left: PairCode,
    pub y_right: PairCode,
    pub z_left: TripletCode,
}

/// Pair code of a site with activation `a` and a neighbour with activation `b`.
#[inline(always)]
pub fn pair_code(a: u8, b: u8) -> PairCode {
    match (a == STATE_A, b == STATE_A) {
        (true, true) => PairCode::BothA,
        (false, false) => PairCode::BothB,
        _ => PairCode::Mixed,
    }
}

/// Left-anchored triplet lookup.
///
/// The mixed branches are not mirror images of each other: an A site with
/// both neighbours mixed maps to `Abb`, a B site with both neighbours mixed
/// maps to `Aab`.
pub fn triplet_code(own: u8, y_left: PairCode, w_left: PairCode) -> TripletCode {
    use PairCode::*;
    use TripletCode::*;
    if own == STATE_A {
        match (y_left == BothA, w_left == BothA) {
            (true, true) => Aaa,
            (true, false) => Aab,
            (false, true) => Aba,
            (false, false) => Abb,
        }
    } else {
        match (y_left == BothB, w_left == BothB) {
            (true, true) => Bbb,
            (true, false) => Abb,
            (false, true) => Bab,
            (false, false) => Aab,
        }
    }
}

/// Classify one site from the activation array.
pub fn classify_site(index: usize, shape: LatticeShape, activations: &[u8]) -> SiteCodes {
    let (row, col) = shape.position(index);
    let nb = Neighbors::of(index, row, col, shape);
    let own = activations[index];

    let w_left = pair_code(own, activations[nb.left]);
    let y_left = pair_code(own, activations[nb.diag_left]);
    SiteCodes {
        w_left,
        w_right: pair_code(own, activations[nb.right]),
        y_left,
        y_right: pair_code(own, activations[nb.diag_right]),
        z_left: triplet_code(own, y_left, w_left),
    }
}

/// Classify every site. Pure in `activations`; `activations.len()` must be
/// `shape.size()`.
pub fn classify(shape: LatticeShape, activations: &[u8]) -> Vec<SiteCodes> {
    debug_assert_eq!(activations.len(), shape.size());
    (0..shape.size())
        .map(|index| classify_site(index, shape, activations))
        .collect()
}
