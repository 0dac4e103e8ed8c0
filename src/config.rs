// config.rs - Run configuration (single source of truth, TOML-loadable)

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::lattice::{Lattice, LatticeShape};
use crate::pattern::{BandPattern, RandomPattern};
use crate::select::DEFAULT_RETRIES;
use crate::thermo::{SweepParams, ZeroLogPolicy};

/// Which activation rule populates the lattice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PatternSpec {
    #[default]
    Reference,
    Random { seed: u64, density: f64 },
    Bands { rows: Vec<Vec<(usize, usize)>> },
}

/// Run-time configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub columns: usize,
    pub rows: usize,
    pub pattern: PatternSpec,
    pub zero_log: ZeroLogPolicy,
    pub sweep: SweepParams,
    pub max_retries: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            columns: 12,
            rows: 2,
            pattern: PatternSpec::Reference,
            zero_log: ZeroLogPolicy::Limit,
            sweep: SweepParams::default(),
            max_retries: DEFAULT_RETRIES,
        }
    }
}

impl RunConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let cfg = Self::from_toml(&text)?;
        info!(path = %path.display(), "configuration loaded");
        Ok(cfg)
    }

    pub fn shape(&self) -> Result<LatticeShape> {
        LatticeShape::new(self.columns, self.rows)
    }

    /// Build and classify the configured lattice.
    pub fn build_lattice(&self) -> Result<Lattice> {
        let shape = self.shape()?;
        match &self.pattern {
            PatternSpec::Reference => Lattice::build(shape, &BandPattern::reference()),
            PatternSpec::Random { seed, density } => {
                Lattice::build(shape, &RandomPattern::new(*seed, *density)?)
            }
            PatternSpec::Bands { rows } => Lattice::build(shape, &BandPattern::new(rows.clone())?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CvmError;

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(RunConfig::from_toml("").unwrap(), RunConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let cfg = RunConfig::from_toml(
            r#"
            columns = 8
            zero_log = "strict"

            [sweep]
            steps = 10

            [pattern]
            kind = "random"
            seed = 42
            density = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(cfg.columns, 8);
        assert_eq!(cfg.rows, 2);
        assert_eq!(cfg.zero_log, ZeroLogPolicy::Strict);
        assert_eq!(cfg.sweep.steps, 10);
        assert_eq!(cfg.sweep.increment, 0.01);
        assert_eq!(cfg.pattern, PatternSpec::Random { seed: 42, density: 0.25 });
        assert_eq!(cfg.build_lattice().unwrap().len(), 16);
    }

    #[test]
    fn test_band_pattern_from_toml() {
        let cfg = RunConfig::from_toml(
            r#"
            columns = 4
            [pattern]
            kind = "bands"
            rows = [[[0, 2]], [[3, 4]]]
            "#,
        )
        .unwrap();
        let lattice = cfg.build_lattice().unwrap();
        assert_eq!(lattice.activations(), vec![1, 1, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_odd_rows_rejected() {
        let cfg = RunConfig { rows: 3, ..RunConfig::default() };
        assert!(matches!(cfg.build_lattice(), Err(CvmError::Configuration(_))));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(RunConfig::from_toml("columns = \"x\""), Err(CvmError::ConfigParse(_))));
    }
}
