// mutate.rs - Two-site activation swap and the comparison overlay

use tracing::{info, warn};

use crate::error::{CvmError, Result};
use crate::lattice::{Lattice, STATE_A};

/// Overlay sentinel: the site was B in the original and is A after the swap.
pub const OVERLAY_NOW_A: u8 = 2;
/// Overlay sentinel: the site was A in the original and is B after the swap.
pub const OVERLAY_NOW_B: u8 = 3;

fn checked_site(lattice: &Lattice, index: usize) -> Result<u8> {
    lattice.site(index).map(|s| s.activation).ok_or_else(|| {
        let shape = lattice.shape();
        let (row, col) = shape.position(index);
        CvmError::SelectionOutOfRange {
            row: row as i64,
            col: col as i64,
            rows: shape.n,
            columns: shape.m,
        }
    })
}

/// Independent copy of `lattice` with the activations of `i1` and `i2`
/// exchanged and all codes recomputed.
///
/// The two sites must differ in activation; otherwise nothing is copied and
/// `SwapRejected` is returned.
pub fn swap_two_sites(lattice: &Lattice, i1: usize, i2: usize) -> Result<Lattice> {
    let a1 = checked_site(lattice, i1)?;
    let a2 = checked_site(lattice, i2)?;
    if a1 == a2 {
        warn!(first = i1, second = i2, activation = a1, "swap rejected");
        return Err(CvmError::SwapRejected { first: i1, second: i2, activation: a1 });
    }

    let revised = lattice.with_exchanged(i1, i2)?;
    info!(first = i1, second = i2, "sites swapped");
    Ok(revised)
}

/// Flat activation sequence for side-by-side rendering: the original
/// lattice followed by the revised one, with the two swapped sites in the
/// revised half replaced by `OVERLAY_NOW_A` / `OVERLAY_NOW_B`.
pub fn comparison_overlay(original: &Lattice, revised: &Lattice, i1: usize, i2: usize) -> Vec<u8> {
    let size = original.len();
    let mut overlay = original.activations();
    overlay.extend(revised.activations());

    for idx in [i1, i2] {
        if let (Some(site), Some(slot)) = (original.site(idx), overlay.get_mut(size + idx)) {
            *slot = if site.activation == STATE_A {
                OVERLAY_NOW_B
            } else {
                OVERLAY_NOW_A
            };
        }
    }
    overlay
}
