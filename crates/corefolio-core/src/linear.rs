//! Linear inequalities over binary decision variables.
//!
//! Constraints never talk to a solver directly. They describe each
//! inequality as a weighted sum of variables compared against a constant and
//! hand it to a [`LinearBuilder`], which turns it into whatever the backend
//! ingests. [`InequalityRecorder`] is the backend-neutral builder: its
//! variables are row indices and its inequalities are plain data.

use std::fmt;

/// Comparison operator of a linear inequality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// `lhs <= rhs`
    LessOrEqual,
    /// `lhs >= rhs`
    GreaterOrEqual,
}

impl Comparison {
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparison::LessOrEqual => "<=",
            Comparison::GreaterOrEqual => ">=",
        }
    }

    /// Evaluates `lhs <cmp> rhs` with an absolute tolerance.
    pub fn holds(&self, lhs: f64, rhs: f64, tolerance: f64) -> bool {
        match self {
            Comparison::LessOrEqual => lhs <= rhs + tolerance,
            Comparison::GreaterOrEqual => lhs >= rhs - tolerance,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Capability to build backend inequalities from weighted sums.
///
/// Each backend adapter implements this once; constraint compilation is
/// generic over it.
///
/// # Example
///
/// ```
/// use corefolio_core::linear::{Comparison, InequalityRecorder, LinearBuilder};
///
/// let recorder = InequalityRecorder;
/// let inequality = recorder.inequality(vec![(0, 1.0), (1, 1.0)], Comparison::LessOrEqual, 1.0);
///
/// assert_eq!(inequality.to_string(), "1*x0 + 1*x1 <= 1");
/// assert!(inequality.is_satisfied_by(&[true, false]));
/// assert!(!inequality.is_satisfied_by(&[true, true]));
/// ```
pub trait LinearBuilder {
    /// Handle of one decision variable.
    type Variable: Copy;

    /// Inequality in the backend's own representation.
    type Inequality;

    /// Builds `sum(coefficient * variable) <comparison> rhs`.
    fn inequality<I>(&self, terms: I, comparison: Comparison, rhs: f64) -> Self::Inequality
    where
        I: IntoIterator<Item = (Self::Variable, f64)>;
}

/// Backend-neutral inequality over variable indices.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInequality {
    pub terms: Vec<(usize, f64)>,
    pub comparison: Comparison,
    pub rhs: f64,
}

impl LinearInequality {
    /// Feasibility tolerance used by [`LinearInequality::is_satisfied_by`].
    pub const TOLERANCE: f64 = 1e-9;

    /// Value of the left-hand side under a boolean assignment.
    ///
    /// Indices outside `assignment` count as unselected.
    pub fn lhs(&self, assignment: &[bool]) -> f64 {
        self.terms
            .iter()
            .filter(|(index, _)| assignment.get(*index).copied().unwrap_or(false))
            .map(|(_, coefficient)| coefficient)
            .sum()
    }

    pub fn is_satisfied_by(&self, assignment: &[bool]) -> bool {
        self.comparison
            .holds(self.lhs(assignment), self.rhs, Self::TOLERANCE)
    }
}

impl fmt::Display for LinearInequality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            f.write_str("0")?;
        }
        for (i, (index, coefficient)) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{}*x{}", coefficient, index)?;
        }
        write!(f, " {} {}", self.comparison, self.rhs)
    }
}

/// Builder that records inequalities as [`LinearInequality`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct InequalityRecorder;

impl InequalityRecorder {
    /// Variables for `n` rows: the indices `0..n`.
    pub fn variables(n: usize) -> Vec<usize> {
        (0..n).collect()
    }
}

impl LinearBuilder for InequalityRecorder {
    type Variable = usize;
    type Inequality = LinearInequality;

    fn inequality<I>(&self, terms: I, comparison: Comparison, rhs: f64) -> LinearInequality
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        LinearInequality {
            terms: terms.into_iter().collect(),
            comparison,
            rhs,
        }
    }
}
