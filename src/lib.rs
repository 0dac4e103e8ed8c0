//! One-dimensional Cluster Variation Method on a two-row zigzag torus.
//!
//! Build a [`lattice::Lattice`] from an activation pattern, read the
//! classified codes, aggregate them into [`aggregate::ConfigVars`], and
//! evaluate [`thermo::neg_entropy`] and the free-energy sweep.

pub mod error;
pub mod lattice;
pub mod neighbors;
pub mod pattern;
pub mod classify;
pub mod aggregate;
pub mod thermo;
pub mod mutate;
pub mod select;
pub mod analysis;
pub mod report;
pub mod config;

pub use error::{CvmError, Result};
