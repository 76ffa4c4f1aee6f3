//! Expression-based adapter on top of `good_lp`.
//!
//! Objective and constraints are written as `good_lp` expressions and the
//! model is handed to the bundled `microlp` engine at solve time.

use corefolio_core::{Comparison, CorefolioError, LinearBuilder, Result};
use good_lp::constraint::{geq, leq};
use good_lp::{variable, Expression, ProblemVariables, Solution, SolverModel, Variable};

use super::{Backend, BackendModel};
use crate::objective::{Objective, Sense};

#[derive(Debug, Clone, Copy, Default)]
pub struct GoodLpBackend;

impl GoodLpBackend {
    pub const NAME: &'static str = "good_lp";
}

impl Backend for GoodLpBackend {
    type Model = GoodLpModel;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn create_model(&self, objective: &Objective) -> (GoodLpModel, Vec<Variable>) {
        let mut problem = ProblemVariables::new();
        let variables: Vec<Variable> = objective
            .coefficients
            .iter()
            .map(|_| problem.add(variable().binary()))
            .collect();
        let expression: Expression = variables
            .iter()
            .zip(&objective.coefficients)
            .map(|(&v, &c)| c * v)
            .sum();
        let model = GoodLpModel {
            problem,
            sense: objective.sense,
            objective: expression,
            constraints: Vec::new(),
        };
        (model, variables)
    }
}

/// Variables, objective and constraints gathered before the solve.
pub struct GoodLpModel {
    problem: ProblemVariables,
    sense: Sense,
    objective: Expression,
    constraints: Vec<good_lp::Constraint>,
}

impl LinearBuilder for GoodLpModel {
    type Variable = Variable;
    type Inequality = good_lp::Constraint;

    fn inequality<I>(&self, terms: I, comparison: Comparison, rhs: f64) -> good_lp::Constraint
    where
        I: IntoIterator<Item = (Variable, f64)>,
    {
        let lhs: Expression = terms.into_iter().map(|(v, c)| c * v).sum();
        match comparison {
            Comparison::LessOrEqual => leq(lhs, rhs),
            Comparison::GreaterOrEqual => geq(lhs, rhs),
        }
    }
}

impl BackendModel for GoodLpModel {
    fn add_inequality(&mut self, inequality: good_lp::Constraint) {
        self.constraints.push(inequality);
    }

    fn solve(self, variables: &[Variable]) -> Result<Vec<f64>> {
        let unsolved = match self.sense {
            Sense::Maximize => self.problem.maximise(self.objective),
            Sense::Minimize => self.problem.minimise(self.objective),
        };
        let mut model = unsolved.using(good_lp::microlp);
        for constraint in self.constraints {
            model = model.with(constraint);
        }
        let solution = model.solve().map_err(|e| CorefolioError::Solve {
            backend: GoodLpBackend::NAME,
            message: e.to_string(),
        })?;
        Ok(variables.iter().map(|&v| solution.value(v)).collect())
    }
}
