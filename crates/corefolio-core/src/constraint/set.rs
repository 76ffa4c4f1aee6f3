//! Ordered collection of constraints.

use crate::error::Result;
use crate::linear::LinearBuilder;
use crate::table::Table;

use super::Constraint;

/// Constraints applied together to one optimization.
///
/// Compilation concatenates member output in insertion order. Contradictory
/// members are not detected here; they surface as an infeasible solve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ConstraintSet::push`].
    pub fn with(mut self, constraint: impl Into<Constraint>) -> Self {
        self.push(constraint);
        self
    }

    pub fn push(&mut self, constraint: impl Into<Constraint>) {
        self.constraints.push(constraint.into());
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Constraint> {
        self.constraints.iter()
    }

    /// Compiles every member against the same variables and table.
    pub fn compile_all<B: LinearBuilder>(
        &self,
        builder: &B,
        variables: &[B::Variable],
        table: &Table,
    ) -> Result<Vec<B::Inequality>> {
        let mut inequalities = Vec::new();
        for constraint in &self.constraints {
            inequalities.extend(constraint.compile(builder, variables, table)?);
        }
        Ok(inequalities)
    }
}

impl<C: Into<Constraint>> FromIterator<C> for ConstraintSet {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self {
            constraints: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<C: Into<Constraint>> Extend<C> for ConstraintSet {
    fn extend<I: IntoIterator<Item = C>>(&mut self, iter: I) {
        self.constraints.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a ConstraintSet {
    type Item = &'a Constraint;
    type IntoIter = std::slice::Iter<'a, Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraints.iter()
    }
}
