//! Shared test fixtures for corefolio crates.
//!
//! - [`tables`] - Asset tables covering numeric, categorical and mixed columns
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! corefolio-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```
//! use corefolio_test::{value_table, value_universe};
//!
//! assert_eq!(value_table().num_rows(), 4);
//! assert_eq!(value_universe().number_of_assets(), 4);
//! ```

pub mod tables;

pub use tables::{
    categorical_table, mixed_table, rows_table, universe, value_table, value_universe, ValueRow,
};
