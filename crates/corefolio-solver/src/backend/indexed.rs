//! Index-based adapter driving `microlp` directly.
//!
//! Every inequality is assembled as an explicit list of
//! `(variable, coefficient)` pairs.

use corefolio_core::{Comparison, CorefolioError, LinearBuilder, Result};
use microlp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem, Variable};

use super::{Backend, BackendModel};
use crate::objective::{Objective, Sense};

#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpBackend;

impl MicroLpBackend {
    pub const NAME: &'static str = "microlp";
}

impl Backend for MicroLpBackend {
    type Model = MicroLpModel;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn create_model(&self, objective: &Objective) -> (MicroLpModel, Vec<Variable>) {
        let direction = match objective.sense {
            Sense::Maximize => OptimizationDirection::Maximize,
            Sense::Minimize => OptimizationDirection::Minimize,
        };
        let mut problem = Problem::new(direction);
        let variables = objective
            .coefficients
            .iter()
            .map(|&c| problem.add_integer_var(c, (0, 1)))
            .collect();
        (MicroLpModel { problem }, variables)
    }
}

pub struct MicroLpModel {
    problem: Problem,
}

/// A row of the `microlp` constraint matrix.
pub struct MicroLpInequality {
    expr: LinearExpr,
    op: ComparisonOp,
    rhs: f64,
}

impl LinearBuilder for MicroLpModel {
    type Variable = Variable;
    type Inequality = MicroLpInequality;

    fn inequality<I>(&self, terms: I, comparison: Comparison, rhs: f64) -> MicroLpInequality
    where
        I: IntoIterator<Item = (Variable, f64)>,
    {
        let mut expr = LinearExpr::empty();
        for (variable, coefficient) in terms {
            expr.add(variable, coefficient);
        }
        let op = match comparison {
            Comparison::LessOrEqual => ComparisonOp::Le,
            Comparison::GreaterOrEqual => ComparisonOp::Ge,
        };
        MicroLpInequality { expr, op, rhs }
    }
}

impl BackendModel for MicroLpModel {
    fn add_inequality(&mut self, inequality: MicroLpInequality) {
        self.problem
            .add_constraint(inequality.expr, inequality.op, inequality.rhs);
    }

    fn solve(self, variables: &[Variable]) -> Result<Vec<f64>> {
        let solution = self.problem.solve().map_err(|e| CorefolioError::Solve {
            backend: MicroLpBackend::NAME,
            message: e.to_string(),
        })?;
        Ok(variables.iter().map(|&v| solution[v]).collect())
    }
}
