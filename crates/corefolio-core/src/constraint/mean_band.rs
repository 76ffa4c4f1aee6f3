//! Mean and frequency bands over a column of the asset table.
//!
//! For a numeric column the band applies to the mean of the selected rows.
//! For a text column it applies, category by category, to the share of
//! selected rows falling in that category. Both are kept linear by
//! multiplying through by the selected count: `mean_sel >= lower` becomes
//! `sum(x_i * (v_i - lower)) >= 0`.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CorefolioError, Result};
use crate::linear::{Comparison, LinearBuilder};
use crate::table::{ColumnData, Table};

use super::check_alignment;

/// Default band half-width around the reference mean or frequency.
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Keeps the selection's mean (numeric column) or category frequencies
/// (text column) within a band.
///
/// The band defaults to the unconditional reference value over all rows
/// plus or minus `tolerance`. An explicit `min_value` / `max_value` replaces
/// the corresponding side verbatim. On a text column the explicit values are
/// shared by every category.
///
/// The empty selection satisfies every band, since both sides reduce to
/// `0 >= 0` and `0 <= 0`. A minimizing run constrained only by bands
/// therefore selects nothing; add a lower cardinality bound to force a pick.
///
/// # Example
///
/// ```
/// use corefolio_core::constraint::MeanBandConstraint;
/// use corefolio_core::linear::InequalityRecorder;
/// use corefolio_core::table::{Column, Table};
///
/// let table = Table::from_columns(vec![
///     Column::float("yield", [1.0, 2.0, 3.0]),
///     Column::text("sector", ["A", "A", "B"]),
/// ])
/// .unwrap();
/// let variables = InequalityRecorder::variables(3);
///
/// let numeric = MeanBandConstraint::new("yield");
/// assert_eq!(numeric.compile(&InequalityRecorder, &variables, &table).unwrap().len(), 2);
///
/// let categorical = MeanBandConstraint::new("sector").with_tolerance(0.05).unwrap();
/// assert_eq!(categorical.compile(&InequalityRecorder, &variables, &table).unwrap().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MeanBandConstraint {
    column: String,
    tolerance: f64,
    min_value: Option<f64>,
    max_value: Option<f64>,
}

impl MeanBandConstraint {
    pub const NAME: &'static str = "mean_band";

    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            tolerance: DEFAULT_TOLERANCE,
            min_value: None,
            max_value: None,
        }
    }

    /// # Errors
    ///
    /// Returns [`CorefolioError::Validation`] unless `tolerance` is finite and
    /// non-negative.
    pub fn with_tolerance(mut self, tolerance: f64) -> Result<Self> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(CorefolioError::Validation(format!(
                "tolerance must be a finite non-negative number, got {}",
                tolerance
            )));
        }
        self.tolerance = tolerance;
        Ok(self)
    }

    pub fn with_min_value(mut self, min_value: f64) -> Self {
        self.min_value = Some(min_value);
        self
    }

    pub fn with_max_value(mut self, max_value: f64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn min_value(&self) -> Option<f64> {
        self.min_value
    }

    pub fn max_value(&self) -> Option<f64> {
        self.max_value
    }

    /// Lower and upper bound of the band around `reference`.
    pub fn band(&self, reference: f64) -> (f64, f64) {
        (
            self.min_value.unwrap_or(reference - self.tolerance),
            self.max_value.unwrap_or(reference + self.tolerance),
        )
    }

    pub fn compile<B: LinearBuilder>(
        &self,
        builder: &B,
        variables: &[B::Variable],
        table: &Table,
    ) -> Result<Vec<B::Inequality>> {
        let column = table
            .column(&self.column)
            .ok_or_else(|| self.error("column not found in table"))?;
        check_alignment(Self::NAME, &self.column, variables, table)?;
        if column.data().missing_count() > 0 {
            return Err(self.error("column contains missing values"));
        }
        if column.is_empty() {
            return Err(self.error("column has no rows to take a mean over"));
        }

        match column.data() {
            ColumnData::Text(_) => {
                let categories = column
                    .data()
                    .text_values()
                    .ok_or_else(|| self.error("column contains missing values"))?;
                Ok(self.compile_categorical(builder, variables, &categories))
            }
            data => {
                let values = data
                    .numeric_values()
                    .ok_or_else(|| self.error("column contains missing values"))?;
                Ok(self.compile_numeric(builder, variables, &values))
            }
        }
    }

    fn compile_numeric<B: LinearBuilder>(
        &self,
        builder: &B,
        variables: &[B::Variable],
        values: &[f64],
    ) -> Vec<B::Inequality> {
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let (lower, upper) = self.band(mean);
        band_pair(builder, variables, values, lower, upper).into()
    }

    fn compile_categorical<B: LinearBuilder>(
        &self,
        builder: &B,
        variables: &[B::Variable],
        categories: &[&str],
    ) -> Vec<B::Inequality> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for &category in categories {
            *counts.entry(category).or_default() += 1;
        }

        let n = categories.len() as f64;
        let mut inequalities = Vec::with_capacity(counts.len() * 2);
        for (category, count) in counts {
            let indicator: Vec<f64> = categories
                .iter()
                .map(|&c| if c == category { 1.0 } else { 0.0 })
                .collect();
            let (lower, upper) = self.band(count as f64 / n);
            inequalities.extend(band_pair(builder, variables, &indicator, lower, upper));
        }
        inequalities
    }

    fn error(&self, reason: &str) -> CorefolioError {
        CorefolioError::compilation(Self::NAME, &self.column, reason)
    }
}

/// `sum(x_i * (v_i - lower)) >= 0` and `sum(x_i * (v_i - upper)) <= 0`.
fn band_pair<B: LinearBuilder>(
    builder: &B,
    variables: &[B::Variable],
    values: &[f64],
    lower: f64,
    upper: f64,
) -> [B::Inequality; 2] {
    let shifted = |offset: f64| {
        variables
            .iter()
            .zip(values)
            .map(move |(&v, &value)| (v, value - offset))
    };
    [
        builder.inequality(shifted(lower), Comparison::GreaterOrEqual, 0.0),
        builder.inequality(shifted(upper), Comparison::LessOrEqual, 0.0),
    ]
}

impl fmt::Display for MeanBandConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mean_band({}, tolerance = {}", self.column, self.tolerance)?;
        if let Some(min) = self.min_value {
            write!(f, ", min = {}", min)?;
        }
        if let Some(max) = self.max_value {
            write!(f, ", max = {}", max)?;
        }
        f.write_str(")")
    }
}
