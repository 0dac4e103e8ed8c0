//! Site selection for the swap step: range validation, a bounded-retry
//! combinator, and a line-oriented prompt built on top of it.

use std::io::{BufRead, Write};

use tracing::warn;

use crate::error::{CvmError, Result};
use crate::lattice::LatticeShape;

/// Default number of retries after a first invalid entry.
pub const DEFAULT_RETRIES: usize = 3;

/// A user-chosen `(row, col)`, not yet checked against a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteSelection {
    pub row: i64,
    pub col: i64,
}

impl SiteSelection {
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// Row-major index if the selection lies on the grid.
    pub fn index(&self, shape: LatticeShape) -> Result<usize> {
        let in_range = |v: i64, bound: usize| v >= 0 && (v as u64) < bound as u64;
        if in_range(self.row, shape.n) && in_range(self.col, shape.m) {
            Ok(shape.index(self.row as usize, self.col as usize))
        } else {
            Err(CvmError::SelectionOutOfRange {
                row: self.row,
                col: self.col,
                rows: shape.n,
                columns: shape.m,
            })
        }
    }
}

/// Run `attempt` once, then up to `retries` more times while it fails.
///
/// `attempt` receives the zero-based attempt number. Every failure is
/// logged; once the budget is spent the result is `SelectionAbandoned`.
pub fn with_retries<T, F>(retries: usize, mut attempt: F) -> Result<T>
where
    F: FnMut(usize) -> Result<T>,
{
    let total = retries + 1;
    for n in 0..total {
        match attempt(n) {
            Ok(value) => return Ok(value),
            Err(err) => warn!(attempt = n + 1, of = total, %err, "invalid selection"),
        }
    }
    Err(CvmError::SelectionAbandoned { attempts: total })
}

/// Parse one entered coordinate and run the grid check on it.
fn parse_entry(line: &str, check: impl Fn(i64) -> Result<()>) -> Result<i64> {
    let text = line.trim();
    let value: i64 = text
        .parse()
        .map_err(|_| CvmError::SelectionNotInteger(text.to_string()))?;
    check(value)?;
    Ok(value)
}

/// Prompt for one integer in `[0, bound)`, retrying on bad input.
fn prompt_value<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    bound: usize,
    retries: usize,
    check: impl Fn(i64) -> Result<()>,
) -> Result<i64> {
    with_retries(retries, |n| {
        if n == 0 {
            write!(output, "Select a {label} number between 0 and {} inclusive: ", bound - 1)?;
        } else {
            write!(output, "Please select a {label} number that is within range: ")?;
        }
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(CvmError::SelectionAbandoned { attempts: n + 1 });
        }
        parse_entry(&line, &check)
    })
}

/// Ask for a row and then a column, each with its own retry budget.
pub fn prompt_site<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    shape: LatticeShape,
    retries: usize,
) -> Result<SiteSelection> {
    // Column 0 always exists, so the row check only fails on the row.
    let row = prompt_value(input, output, "row", shape.n, retries, |row| {
        SiteSelection::new(row, 0).index(shape).map(|_| ())
    })?;
    let col = prompt_value(input, output, "column", shape.m, retries, |col| {
        SiteSelection::new(row, col).index(shape).map(|_| ())
    })?;
    writeln!(output, "Your node selection is at row {row} and column {col}")?;
    Ok(SiteSelection { row, col })
}
