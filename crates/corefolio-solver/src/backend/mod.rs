//! Solver backend adapters.
//!
//! An adapter turns an [`Objective`] plus compiled inequalities into a call
//! to one mathematical programming engine and reads the variable values
//! back. Each adapter provides:
//! - variable creation and objective construction ([`Backend::create_model`])
//! - inequality construction ([`LinearBuilder`])
//! - constraint ingestion ([`BackendModel::add_inequality`])
//! - solve invocation and value extraction ([`BackendModel::solve`])
//!
//! Adding a backend means adding one adapter and one [`SolverKind`] variant.

mod expression;
mod indexed;


pub use expression::{GoodLpBackend, GoodLpModel};
pub use indexed::{MicroLpBackend, MicroLpInequality, MicroLpModel};

use std::fmt;
use std::str::FromStr;

use corefolio_core::{ConstraintSet, CorefolioError, LinearBuilder, Result, Table};
use tracing::debug;

use crate::objective::Objective;

/// Variable handle type of a backend's model.
pub type BackendVariable<B> = <<B as Backend>::Model as LinearBuilder>::Variable;

/// Entry point of a solver engine.
pub trait Backend: Send + Sync {
    type Model: BackendModel;

    /// Backend name for logging and errors.
    fn name(&self) -> &'static str;

    /// Creates a model with one binary variable per objective coefficient.
    ///
    /// The returned variables are index-aligned with `objective.coefficients`.
    fn create_model(&self, objective: &Objective) -> (Self::Model, Vec<BackendVariable<Self>>);
}

/// A model under construction.
pub trait BackendModel: LinearBuilder + Sized {
    fn add_inequality(&mut self, inequality: Self::Inequality);

    /// Solves the model and returns the value of each variable in `variables`.
    ///
    /// # Errors
    ///
    /// Returns [`CorefolioError::Solve`] when the engine reports an
    /// infeasible or unbounded program, or fails internally.
    fn solve(self, variables: &[Self::Variable]) -> Result<Vec<f64>>;
}

/// Builds, compiles and solves one program on `backend`.
pub fn solve_program<B: Backend>(
    backend: &B,
    objective: &Objective,
    constraints: &ConstraintSet,
    table: &Table,
) -> Result<Vec<f64>> {
    let (mut model, variables) = backend.create_model(objective);
    let inequalities = constraints.compile_all(&model, &variables, table)?;
    debug!(
        event = "constraints_compiled",
        backend = backend.name(),
        variables = variables.len(),
        inequalities = inequalities.len(),
    );
    for inequality in inequalities {
        model.add_inequality(inequality);
    }
    model.solve(&variables)
}

/// Selects which backend adapter solves a program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SolverKind {
    /// Expression-based modelling through `good_lp`.
    #[default]
    GoodLp,
    /// Explicit variable-indexed sums through `microlp`.
    MicroLp,
}

impl SolverKind {
    pub const ALL: [SolverKind; 2] = [SolverKind::GoodLp, SolverKind::MicroLp];

    pub fn name(&self) -> &'static str {
        match self {
            SolverKind::GoodLp => GoodLpBackend::NAME,
            SolverKind::MicroLp => MicroLpBackend::NAME,
        }
    }

    /// Runs [`solve_program`] on the selected adapter.
    pub fn solve(
        &self,
        objective: &Objective,
        constraints: &ConstraintSet,
        table: &Table,
    ) -> Result<Vec<f64>> {
        match self {
            SolverKind::GoodLp => solve_program(&GoodLpBackend, objective, constraints, table),
            SolverKind::MicroLp => solve_program(&MicroLpBackend, objective, constraints, table),
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolverKind {
    type Err = CorefolioError;

    fn from_str(s: &str) -> Result<Self> {
        SolverKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                CorefolioError::Validation(format!(
                    "unknown solver '{}', choose one of: {}",
                    s,
                    SolverKind::ALL.map(|k| k.name()).join(", ")
                ))
            })
    }
}
