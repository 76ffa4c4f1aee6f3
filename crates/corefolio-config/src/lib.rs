//! Configuration system for corefolio.
//!
//! Load optimizer configuration from TOML or YAML files to choose the
//! backend, the optimization sense and the portfolio constraints without
//! code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use corefolio_config::OptimizerConfig;
//!
//! let config = OptimizerConfig::from_toml_str(r#"
//!     solver = "microlp"
//!     sense = "minimize"
//!     max_assets = 10
//!
//!     [[constraints]]
//!     type = "mean_band"
//!     column = "duration"
//!     tolerance = 0.5
//! "#).unwrap();
//!
//! assert_eq!(config.solver, "microlp");
//! assert_eq!(config.max_assets, Some(10));
//! assert_eq!(config.constraint_set().unwrap().len(), 2);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use corefolio_config::OptimizerConfig;
//!
//! let config = OptimizerConfig::load("corefolio.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! assert_eq!(config.sense, "maximize");
//! ```

use std::path::Path;

use corefolio_core::{CardinalityConstraint, ConstraintSet, CorefolioError, MeanBandConstraint};
use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn default_solver() -> String {
    "good_lp".to_string()
}

fn default_sense() -> String {
    "maximize".to_string()
}

fn default_value_column() -> String {
    "value".to_string()
}

fn default_id_column() -> String {
    "ID".to_string()
}

/// Main optimizer configuration.
///
/// `solver` and `sense` stay strings here; the optimizer validates them when
/// it is built so that an unknown value is a validation error rather than a
/// parse error.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OptimizerConfig {
    /// Backend selector (`"good_lp"` or `"microlp"`).
    #[serde(default = "default_solver")]
    pub solver: String,

    /// Optimization sense (`"maximize"` or `"minimize"`).
    #[serde(default = "default_sense")]
    pub sense: String,

    /// Column holding the objective values.
    #[serde(default = "default_value_column")]
    pub value_column: String,

    /// Identifier column of the universe.
    #[serde(default = "default_id_column")]
    pub id_column: String,

    /// Upper bound on the number of selected assets.
    #[serde(default)]
    pub max_assets: Option<usize>,

    /// Lower bound on the number of selected assets; requires `max_assets`.
    #[serde(default)]
    pub min_assets: Option<usize>,

    /// Additional constraints, applied in order after the top-level bounds.
    #[serde(default)]
    pub constraints: Vec<ConstraintConfig>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            solver: default_solver(),
            sense: default_sense(),
            value_column: default_value_column(),
            id_column: default_id_column(),
            max_assets: None,
            min_assets: None,
            constraints: Vec::new(),
        }
    }
}

impl OptimizerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the backend selector.
    pub fn with_solver(mut self, solver: impl Into<String>) -> Self {
        self.solver = solver.into();
        self
    }

    /// Sets the optimization sense.
    pub fn with_sense(mut self, sense: impl Into<String>) -> Self {
        self.sense = sense.into();
        self
    }

    /// Sets the objective column.
    pub fn with_value_column(mut self, column: impl Into<String>) -> Self {
        self.value_column = column.into();
        self
    }

    /// Sets the upper bound on selected assets.
    pub fn with_max_assets(mut self, max_assets: usize) -> Self {
        self.max_assets = Some(max_assets);
        self
    }

    /// Sets the lower bound on selected assets.
    pub fn with_min_assets(mut self, min_assets: usize) -> Self {
        self.min_assets = Some(min_assets);
        self
    }

    /// Adds a constraint configuration.
    pub fn with_constraint(mut self, constraint: ConstraintConfig) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Builds the constraint set described by this configuration.
    ///
    /// The top-level `max_assets` / `min_assets` bound comes first, followed
    /// by `constraints` in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use corefolio_config::{ConstraintConfig, OptimizerConfig};
    ///
    /// let config = OptimizerConfig::new()
    ///     .with_max_assets(3)
    ///     .with_constraint(ConstraintConfig::mean_band("sector"));
    ///
    /// let set = config.constraint_set().unwrap();
    /// assert_eq!(set.len(), 2);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CorefolioError::Validation`] if `min_assets` is set without
    /// `max_assets` or if a constraint's parameters are invalid.
    pub fn constraint_set(&self) -> Result<ConstraintSet, CorefolioError> {
        let mut set = ConstraintSet::new();
        match (self.max_assets, self.min_assets) {
            (Some(max_assets), min_assets) => {
                let mut cardinality = CardinalityConstraint::new(max_assets)?;
                if let Some(min_assets) = min_assets {
                    cardinality = cardinality.with_min_assets(min_assets);
                }
                set.push(cardinality);
            }
            (None, Some(_)) => {
                return Err(CorefolioError::Validation(
                    "min_assets requires max_assets".to_string(),
                ));
            }
            (None, None) => {}
        }
        for constraint in &self.constraints {
            constraint.push_into(&mut set)?;
        }
        Ok(set)
    }
}

/// Constraint configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConstraintConfig {
    /// Bound on the number of selected assets.
    Cardinality(CardinalityConfig),

    /// Mean or frequency band over a column.
    MeanBand(MeanBandConfig),
}

impl ConstraintConfig {
    /// Cardinality constraint with an upper bound.
    pub fn cardinality(max_assets: usize) -> Self {
        ConstraintConfig::Cardinality(CardinalityConfig {
            max_assets,
            min_assets: None,
        })
    }

    /// Mean band constraint with the default tolerance.
    pub fn mean_band(column: impl Into<String>) -> Self {
        ConstraintConfig::MeanBand(MeanBandConfig {
            column: column.into(),
            ..MeanBandConfig::default()
        })
    }

    fn push_into(&self, set: &mut ConstraintSet) -> Result<(), CorefolioError> {
        match self {
            ConstraintConfig::Cardinality(c) => {
                let mut constraint = CardinalityConstraint::new(c.max_assets)?;
                if let Some(min_assets) = c.min_assets {
                    constraint = constraint.with_min_assets(min_assets);
                }
                set.push(constraint);
            }
            ConstraintConfig::MeanBand(c) => {
                let mut constraint = MeanBandConstraint::new(c.column.clone());
                if let Some(tolerance) = c.tolerance {
                    constraint = constraint.with_tolerance(tolerance)?;
                }
                if let Some(min_value) = c.min_value {
                    constraint = constraint.with_min_value(min_value);
                }
                if let Some(max_value) = c.max_value {
                    constraint = constraint.with_max_value(max_value);
                }
                set.push(constraint);
            }
        }
        Ok(())
    }
}

/// Cardinality constraint configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CardinalityConfig {
    /// Maximum number of selected assets.
    pub max_assets: usize,

    /// Minimum number of selected assets.
    #[serde(default)]
    pub min_assets: Option<usize>,
}

/// Mean band constraint configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MeanBandConfig {
    /// Column the band applies to.
    pub column: String,

    /// Band half-width; the constraint default applies when absent.
    #[serde(default)]
    pub tolerance: Option<f64>,

    /// Explicit lower bound.
    #[serde(default)]
    pub min_value: Option<f64>,

    /// Explicit upper bound.
    #[serde(default)]
    pub max_value: Option<f64>,
}
