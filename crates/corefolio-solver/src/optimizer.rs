//! Asset selection as a binary integer program.
//!
//! One binary variable per asset, a linear objective over a value column
//! and the inequalities compiled from a [`ConstraintSet`].

use corefolio_config::OptimizerConfig;
use corefolio_core::{
    AssetId, ConstraintSet, CorefolioError, InequalityRecorder, LinearInequality, Result, Universe,
};
use tracing::{info, warn};

use crate::backend::SolverKind;
use crate::objective::{Objective, Sense};
use crate::selection::Selection;

/// Default objective column.
pub const DEFAULT_VALUE_COLUMN: &str = "value";

/// Variable values above this resolve to "selected".
const SELECTED_THRESHOLD: f64 = 0.5;

/// Name used in errors about the objective column.
const OBJECTIVE: &str = "objective";

/// Chooses a subset of a [`Universe`] that optimizes a value column under
/// a [`ConstraintSet`].
///
/// # Example
///
/// ```
/// use corefolio_core::{AssetId, CardinalityConstraint, Column, ConstraintSet, Table, Universe};
/// use corefolio_solver::{Optimizer, SolverKind};
///
/// let table = Table::from_columns(vec![
///     Column::integer("ID", [1, 2, 3]),
///     Column::float("value", [10.0, 20.0, 30.0]),
/// ])
/// .unwrap();
/// let universe = Universe::from_table(table).unwrap();
/// let constraints = ConstraintSet::new().with(CardinalityConstraint::new(2).unwrap());
///
/// let selected = Optimizer::new(&universe, constraints)
///     .with_solver(SolverKind::MicroLp)
///     .optimize()
///     .unwrap();
/// assert_eq!(selected, vec![AssetId::Integer(2), AssetId::Integer(3)]);
/// ```
#[derive(Debug, Clone)]
pub struct Optimizer<'a> {
    universe: &'a Universe,
    constraints: ConstraintSet,
    solver: SolverKind,
    sense: Sense,
    value_column: String,
}

impl<'a> Optimizer<'a> {
    /// Maximizes `"value"` with the default backend.
    pub fn new(universe: &'a Universe, constraints: ConstraintSet) -> Self {
        Self {
            universe,
            constraints,
            solver: SolverKind::default(),
            sense: Sense::default(),
            value_column: DEFAULT_VALUE_COLUMN.to_string(),
        }
    }

    /// Builds an optimizer from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CorefolioError::Validation`] for an unknown sense or solver,
    /// for an identifier column that differs from the universe's, or for
    /// invalid constraint parameters.
    pub fn from_config(universe: &'a Universe, config: &OptimizerConfig) -> Result<Self> {
        let sense: Sense = config.sense.parse()?;
        let solver: SolverKind = config.solver.parse()?;
        if config.id_column != universe.id_column() {
            return Err(CorefolioError::Validation(format!(
                "configured id column '{}' does not match universe id column '{}'",
                config.id_column,
                universe.id_column()
            )));
        }
        let constraints = config.constraint_set()?;
        Ok(Self::new(universe, constraints)
            .with_solver(solver)
            .with_sense(sense)
            .with_value_column(config.value_column.clone()))
    }

    pub fn with_solver(mut self, solver: SolverKind) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_sense(mut self, sense: Sense) -> Self {
        self.sense = sense;
        self
    }

    pub fn with_value_column(mut self, column: impl Into<String>) -> Self {
        self.value_column = column.into();
        self
    }

    pub fn universe(&self) -> &Universe {
        self.universe
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn solver(&self) -> SolverKind {
        self.solver
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn value_column(&self) -> &str {
        &self.value_column
    }

    /// Objective of the program: `sense.sign() * value_i`, maximized.
    ///
    /// # Errors
    ///
    /// Returns [`CorefolioError::Compilation`] if the value column is absent
    /// or not numeric.
    pub fn objective(&self) -> Result<Objective> {
        Ok(Objective::signed(self.sense, &self.values()?))
    }

    /// Inequalities the constraint set produces for this universe, over
    /// row indices.
    pub fn compile(&self) -> Result<Vec<LinearInequality>> {
        let variables = InequalityRecorder::variables(self.universe.number_of_assets());
        self.constraints
            .compile_all(&InequalityRecorder, &variables, self.universe.table())
    }

    /// Solves the program and returns the selected identifiers in row order.
    pub fn optimize(&self) -> Result<Vec<AssetId>> {
        Ok(self.solve()?.into_ids())
    }

    /// Solves the program.
    ///
    /// # Errors
    ///
    /// Returns [`CorefolioError::Compilation`] if the objective or a
    /// constraint cannot be built, and [`CorefolioError::Solve`] if the
    /// backend finds the program infeasible or unbounded.
    pub fn solve(&self) -> Result<Selection> {
        let values = self.values()?;
        let objective = Objective::signed(self.sense, &values);
        let n_assets = self.universe.number_of_assets();
        let backend = self.solver.name();

        info!(
            event = "optimize_start",
            assets = n_assets,
            constraints = self.constraints.len(),
            backend = backend,
            sense = self.sense.as_str(),
        );

        let solved = if n_assets == 0 {
            self.solve_empty().map(|()| Vec::new())
        } else {
            self.solver
                .solve(&objective, &self.constraints, self.universe.table())
        };
        let solved = match solved {
            Ok(solved) => solved,
            Err(e) => {
                if e.is_solve() {
                    warn!(event = "solve_failed", backend = backend, error = %e);
                }
                return Err(e);
            }
        };

        let mut rows = Vec::new();
        let mut ids = Vec::new();
        let mut objective_value = 0.0;
        let assets = self.universe.ids().iter().zip(&values).zip(&solved);
        for (row, ((id, &value), &resolved)) in assets.enumerate() {
            if resolved > SELECTED_THRESHOLD {
                rows.push(row);
                ids.push(id.clone());
                objective_value += value;
            }
        }

        info!(
            event = "optimize_end",
            selected = ids.len(),
            objective = objective_value,
        );
        Ok(Selection::new(ids, rows, objective_value, backend))
    }

    /// Nothing to choose from: the only candidate is the empty selection.
    fn solve_empty(&self) -> Result<()> {
        let violated = self
            .compile()?
            .into_iter()
            .find(|inequality| !inequality.is_satisfied_by(&[]));
        match violated {
            Some(inequality) => Err(CorefolioError::Solve {
                backend: self.solver.name(),
                message: format!("infeasible: {} rules out the empty selection", inequality),
            }),
            None => Ok(()),
        }
    }

    fn values(&self) -> Result<Vec<f64>> {
        let column = self
            .universe
            .table()
            .column(&self.value_column)
            .ok_or_else(|| {
                CorefolioError::compilation(
                    OBJECTIVE,
                    &self.value_column,
                    "column not found in table",
                )
            })?;
        column.data().numeric_values().ok_or_else(|| {
            CorefolioError::compilation(
                OBJECTIVE,
                &self.value_column,
                format!("column must be numeric, found {}", column.data().kind()),
            )
        })
    }
}
