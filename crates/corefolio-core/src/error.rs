//! Error types for corefolio

use thiserror::Error;

/// Main error type for corefolio operations
#[derive(Debug, Error)]
pub enum CorefolioError {
    /// Malformed universe input or optimizer configuration
    #[error("Validation error: {0}")]
    Validation(String),

    /// A constraint could not produce inequalities for the given table
    #[error("Compilation error in {constraint} constraint on column '{column}': {reason}")]
    Compilation {
        constraint: &'static str,
        column: String,
        reason: String,
    },

    /// The backend reported an infeasible, unbounded or failed solve
    #[error("Solve error ({backend}): {message}")]
    Solve {
        backend: &'static str,
        message: String,
    },
}

impl CorefolioError {
    /// Builds a [`CorefolioError::Compilation`].
    pub fn compilation(
        constraint: &'static str,
        column: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CorefolioError::Compilation {
            constraint,
            column: column.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for [`CorefolioError::Validation`].
    pub fn is_validation(&self) -> bool {
        matches!(self, CorefolioError::Validation(_))
    }

    /// Returns true for [`CorefolioError::Compilation`].
    pub fn is_compilation(&self) -> bool {
        matches!(self, CorefolioError::Compilation { .. })
    }

    /// Returns true for [`CorefolioError::Solve`].
    pub fn is_solve(&self) -> bool {
        matches!(self, CorefolioError::Solve { .. })
    }
}

/// Result type alias for corefolio operations
pub type Result<T> = std::result::Result<T, CorefolioError>;
