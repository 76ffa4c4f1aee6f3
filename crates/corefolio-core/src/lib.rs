//! corefolio Core - Core types for portfolio selection
//!
//! This crate provides the fundamental abstractions for corefolio:
//! - Column-oriented tables of asset attributes
//! - The validated universe of candidate assets
//! - The linear-builder capability shared by solver backends
//! - Portfolio constraints and their compilation into linear inequalities

pub mod constraint;
pub mod error;
pub mod linear;
pub mod table;
pub mod universe;


pub use constraint::{CardinalityConstraint, Constraint, ConstraintSet, MeanBandConstraint};
pub use error::{CorefolioError, Result};
pub use linear::{Comparison, InequalityRecorder, LinearBuilder, LinearInequality};
pub use table::{Column, ColumnData, ColumnKind, Table};
pub use universe::{AssetId, Universe};
