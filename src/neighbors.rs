//! Wrap-around neighbour addressing on the two-row zigzag torus.
//!
//! Rows are paired (0 with 1, 2 with 3, ...). Odd rows sit half a column to
//! the right of the even row above them, so an even-row site sees its
//! diagonal neighbours in the row below at `col-1` and `col`, and an odd-row
//! site sees them in the row above at `col` and `col+1`. Every function
//! returns an index in `[0, M*N)`.

use crate::lattice::LatticeShape;

/// Same-row neighbour to the left, wrapping column 0 to column M-1.
#[inline(always)]
pub fn left_same_row(index: usize, row: usize, col: usize, shape: LatticeShape) -> usize {
    if col == 0 {
        row * shape.m + (shape.m - 1)
    } else {
        index - 1
    }
}

/// Same-row neighbour to the right, wrapping column M-1 to column 0.
#[inline(always)]
pub fn right_same_row(index: usize, row: usize, col: usize, shape: LatticeShape) -> usize {
    if col == shape.m - 1 {
        row * shape.m
    } else {
        index + 1
    }
}

/// Left diagonal neighbour in the paired row.
#[inline(always)]
pub fn diag_left(_index: usize, row: usize, col: usize, shape: LatticeShape) -> usize {
    let m = shape.m;
    if row % 2 == 0 {
        if col == 0 {
            (row + 2) * m - 1
        } else {
            (row + 1) * m + col - 1
        }
    } else {
        (row - 1) * m + col
    }
}

/// Right diagonal neighbour in the paired row.
#[inline(always)]
pub fn diag_right(_index: usize, row: usize, col: usize, shape: LatticeShape) -> usize {
    let m = shape.m;
    if row % 2 == 0 {
        (row + 1) * m + col
    } else if col == m - 1 {
        (row - 1) * m
    } else {
        (row - 1) * m + col + 1
    }
}

/// All four neighbour indices of one site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors {
    pub left: usize,
    pub right: usize,
    pub diag_left: usize,
    pub diag_right: usize,
}

impl Neighbors {
    pub fn of(index: usize, row: usize, col: usize, shape: LatticeShape) -> Self {
        Self {
            left: left_same_row(index, row, col, shape),
            right: right_same_row(index, row, col, shape),
            diag_left: diag_left(index, row, col, shape),
            diag_right: diag_right(index, row, col, shape),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_site_offsets() {
        let shape = LatticeShape::new(6, 2).unwrap();
        // (0, 3) -> index 3
        let nb = Neighbors::of(3, 0, 3, shape);
        assert_eq!(nb, Neighbors { left: 2, right: 4, diag_left: 8, diag_right: 9 });
        // (1, 3) -> index 9
        let nb = Neighbors::of(9, 1, 3, shape);
        assert_eq!(nb, Neighbors { left: 8, right: 10, diag_left: 3, diag_right: 4 });
    }

    #[test]
    fn test_odd_row_right_diagonal_wraps_to_row_above() {
        let shape = LatticeShape::new(6, 2).unwrap();
        assert_eq!(diag_right(11, 1, 5, shape), 0);
    }
}
