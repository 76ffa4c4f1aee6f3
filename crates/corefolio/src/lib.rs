//! corefolio - Portfolio selection as binary integer programming
//!
//! Pick the subset of a universe of assets that maximizes or minimizes a
//! value column, subject to cardinality and mean or frequency bands.
//!
//! # Example
//!
//! ```rust
//! use corefolio::prelude::*;
//!
//! let table = Table::from_columns(vec![
//!     Column::integer("ID", [1, 2, 3, 4]),
//!     Column::float("value", [10.0, 20.0, 30.0, 40.0]),
//! ])
//! .unwrap();
//! let universe = Universe::from_table(table).unwrap();
//! let constraints = ConstraintSet::new().with(CardinalityConstraint::new(2).unwrap());
//!
//! let selected = Optimizer::new(&universe, constraints).optimize().unwrap();
//! assert_eq!(selected, vec![AssetId::Integer(3), AssetId::Integer(4)]);
//! ```

// Data model
pub use corefolio_core::{AssetId, Column, ColumnData, ColumnKind, Table, Universe};

// Constraints
pub use corefolio_core::{
    CardinalityConstraint, Comparison, Constraint, ConstraintSet, InequalityRecorder,
    LinearBuilder, LinearInequality, MeanBandConstraint,
};

// Errors
pub use corefolio_core::{CorefolioError, Result};

// Configuration
pub use corefolio_config::{ConfigError, ConstraintConfig, OptimizerConfig};

// Optimizer and backends
pub use corefolio_solver::{
    Backend, BackendModel, GoodLpBackend, MicroLpBackend, Objective, Optimizer, Selection, Sense,
    SolverKind,
};

#[cfg(feature = "console")]
pub mod console;


pub mod prelude {
    pub use super::{AssetId, Column, Table, Universe};
    pub use super::{CardinalityConstraint, ConstraintSet, MeanBandConstraint};
    pub use super::{CorefolioError, OptimizerConfig};
    pub use super::{Optimizer, Selection, Sense, SolverKind};
}
