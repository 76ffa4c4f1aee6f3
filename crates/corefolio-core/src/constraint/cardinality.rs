//! Upper (and optional lower) bound on the number of selected assets.

use std::fmt;

use crate::error::{CorefolioError, Result};
use crate::linear::{Comparison, LinearBuilder};
use crate::table::Table;

use super::check_alignment;

/// Limits how many assets may be selected.
///
/// Compiles to `sum(x_i) <= max_assets`, plus `sum(x_i) >= min_assets` when
/// a lower bound is set. Neither bound is checked against the universe size;
/// an unreachable bound yields an infeasible program.
///
/// # Example
///
/// ```
/// use corefolio_core::constraint::CardinalityConstraint;
/// use corefolio_core::linear::InequalityRecorder;
/// use corefolio_core::table::{Column, Table};
///
/// let table = Table::from_columns(vec![Column::integer("ID", [1, 2, 3])]).unwrap();
/// let variables = InequalityRecorder::variables(3);
///
/// let constraint = CardinalityConstraint::new(2).unwrap();
/// let compiled = constraint.compile(&InequalityRecorder, &variables, &table).unwrap();
///
/// assert_eq!(compiled.len(), 1);
/// assert_eq!(compiled[0].to_string(), "1*x0 + 1*x1 + 1*x2 <= 2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardinalityConstraint {
    max_assets: usize,
    min_assets: Option<usize>,
}

impl CardinalityConstraint {
    pub const NAME: &'static str = "cardinality";

    /// # Errors
    ///
    /// Returns [`CorefolioError::Validation`] if `max_assets` is zero.
    pub fn new(max_assets: usize) -> Result<Self> {
        if max_assets == 0 {
            return Err(CorefolioError::Validation(
                "max_assets must be a positive integer".to_string(),
            ));
        }
        Ok(Self {
            max_assets,
            min_assets: None,
        })
    }

    /// Also requires at least `min_assets` selected assets.
    pub fn with_min_assets(mut self, min_assets: usize) -> Self {
        self.min_assets = Some(min_assets);
        self
    }

    pub fn max_assets(&self) -> usize {
        self.max_assets
    }

    pub fn min_assets(&self) -> Option<usize> {
        self.min_assets
    }

    pub fn compile<B: LinearBuilder>(
        &self,
        builder: &B,
        variables: &[B::Variable],
        table: &Table,
    ) -> Result<Vec<B::Inequality>> {
        check_alignment(Self::NAME, "*", variables, table)?;

        let ones = || variables.iter().map(|&v| (v, 1.0));
        let mut inequalities = vec![builder.inequality(
            ones(),
            Comparison::LessOrEqual,
            self.max_assets as f64,
        )];
        if let Some(min_assets) = self.min_assets {
            inequalities.push(builder.inequality(
                ones(),
                Comparison::GreaterOrEqual,
                min_assets as f64,
            ));
        }
        Ok(inequalities)
    }
}

impl fmt::Display for CardinalityConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.min_assets {
            Some(min) => write!(f, "cardinality({} <= n <= {})", min, self.max_assets),
            None => write!(f, "cardinality(n <= {})", self.max_assets),
        }
    }
}
