//! corefolio Solver - Backends and optimizer
//!
//! This crate turns a universe and a constraint set into a binary integer
//! program and solves it:
//! - Backend adapters for `good_lp` and `microlp`
//! - Objective construction from a value column
//! - The optimizer and its selection result

pub mod backend;
pub mod objective;
pub mod optimizer;
pub mod selection;


pub use backend::{solve_program, Backend, BackendModel, GoodLpBackend, MicroLpBackend, SolverKind};
pub use objective::{Objective, Sense};
pub use optimizer::{Optimizer, DEFAULT_VALUE_COLUMN};
pub use selection::Selection;
