//! Portfolio constraints and their compilation into linear inequalities.
//!
//! [`Constraint`] is the closed set of supported rules. Each variant
//! compiles against a [`LinearBuilder`] so the same code serves every
//! backend adapter; [`ConstraintSet`] concatenates the results in insertion
//! order.

mod cardinality;
mod mean_band;
mod set;

#[cfg(test)]
mod tests;

pub use cardinality::CardinalityConstraint;
pub use mean_band::{MeanBandConstraint, DEFAULT_TOLERANCE};
pub use set::ConstraintSet;

use std::fmt;

use crate::error::{CorefolioError, Result};
use crate::linear::LinearBuilder;
use crate::table::Table;

/// One portfolio rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Cardinality(CardinalityConstraint),
    MeanBand(MeanBandConstraint),
}

impl Constraint {
    /// Short name used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Constraint::Cardinality(_) => CardinalityConstraint::NAME,
            Constraint::MeanBand(_) => MeanBandConstraint::NAME,
        }
    }

    /// Compiles the rule into inequalities over `variables`.
    ///
    /// `variables` must be index-aligned with the rows of `table`.
    ///
    /// # Errors
    ///
    /// Returns [`CorefolioError::Compilation`] when the rule cannot be
    /// expressed for `table`.
    pub fn compile<B: LinearBuilder>(
        &self,
        builder: &B,
        variables: &[B::Variable],
        table: &Table,
    ) -> Result<Vec<B::Inequality>> {
        match self {
            Constraint::Cardinality(c) => c.compile(builder, variables, table),
            Constraint::MeanBand(c) => c.compile(builder, variables, table),
        }
    }
}

impl From<CardinalityConstraint> for Constraint {
    fn from(constraint: CardinalityConstraint) -> Self {
        Constraint::Cardinality(constraint)
    }
}

impl From<MeanBandConstraint> for Constraint {
    fn from(constraint: MeanBandConstraint) -> Self {
        Constraint::MeanBand(constraint)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Cardinality(c) => fmt::Display::fmt(c, f),
            Constraint::MeanBand(c) => fmt::Display::fmt(c, f),
        }
    }
}

/// Every row needs exactly one decision variable.
pub(crate) fn check_alignment<V>(
    constraint: &'static str,
    column: &str,
    variables: &[V],
    table: &Table,
) -> Result<()> {
    if variables.len() != table.num_rows() {
        return Err(CorefolioError::compilation(
            constraint,
            column,
            format!(
                "{} decision variables for {} table rows",
                variables.len(),
                table.num_rows()
            ),
        ));
    }
    Ok(())
}
