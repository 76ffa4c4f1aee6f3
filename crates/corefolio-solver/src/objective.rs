//! Optimization sense and linear objective.

use std::fmt;
use std::str::FromStr;

use corefolio_core::{CorefolioError, Result};

/// Direction of the optimization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Sense {
    #[default]
    Maximize,
    Minimize,
}

impl Sense {
    /// `+1.0` for maximize, `-1.0` for minimize.
    pub fn sign(&self) -> f64 {
        match self {
            Sense::Maximize => 1.0,
            Sense::Minimize => -1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sense::Maximize => "maximize",
            Sense::Minimize => "minimize",
        }
    }
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sense {
    type Err = CorefolioError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "maximize" => Ok(Sense::Maximize),
            "minimize" => Ok(Sense::Minimize),
            other => Err(CorefolioError::Validation(format!(
                "invalid sense '{}', choose 'maximize' or 'minimize'",
                other
            ))),
        }
    }
}

/// Linear objective over one binary variable per coefficient.
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    pub sense: Sense,
    pub coefficients: Vec<f64>,
}

impl Objective {
    pub fn new(sense: Sense, coefficients: Vec<f64>) -> Self {
        Self {
            sense,
            coefficients,
        }
    }

    /// Maximizes `sense.sign() * values`, so both senses share one direction.
    pub fn signed(sense: Sense, values: &[f64]) -> Self {
        let sign = sense.sign();
        Self::new(Sense::Maximize, values.iter().map(|v| sign * v).collect())
    }

    /// Number of decision variables.
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }
}
