//! Error types for the CVM engine and its binaries.

use thiserror::Error;

/// Every failure the engine can report.
#[derive(Error, Debug)]
pub enum CvmError {
    /// Grid shape or pattern cannot be built (odd rows, zero size, bad band).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A (row, col) selection falls outside the grid.
    #[error("Selection out of range: row {row}, col {col} (grid is {rows} x {columns})")]
    SelectionOutOfRange {
        row: i64,
        col: i64,
        rows: usize,
        columns: usize,
    },

    /// An entered coordinate is not an integer.
    #[error("Selection is not an integer: '{0}'")]
    SelectionNotInteger(String),

    /// Bounded retries ran out before a valid value was entered.
    #[error("Selection abandoned after {attempts} attempts")]
    SelectionAbandoned { attempts: usize },

    /// Swap requested on two sites in the same state.
    #[error("Swap rejected: sites {first} and {second} both have activation {activation}")]
    SwapRejected {
        first: usize,
        second: usize,
        activation: u8,
    },

    /// A configuration fraction cannot enter the logarithm.
    #[error("Numeric domain error: {term} = {value}")]
    NumericDomain { term: &'static str, value: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, CvmError>;

impl CvmError {
    #[must_use]
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CvmError::configuration("row count 3 is odd");
        assert_eq!(err.to_string(), "Configuration error: row count 3 is odd");

        let err = CvmError::SwapRejected { first: 1, second: 2, activation: 0 };
        assert!(err.to_string().contains("both have activation 0"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CvmError = io_err.into();
        assert!(matches!(err, CvmError::Io(_)));
    }
}
