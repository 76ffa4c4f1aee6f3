//! The validated set of candidate assets.
//!
//! A [`Universe`] wraps a [`Table`] with one row per asset and an identifier
//! column. Construction rejects missing cells and duplicate identifiers; a
//! missing identifier column is synthesized as `1..=N` in row order.
//!
//! # Example
//!
//! ```
//! use corefolio_core::table::{Column, Table};
//! use corefolio_core::universe::{AssetId, Universe};
//!
//! let table = Table::from_columns(vec![Column::float("value", [1.0, 2.0])]).unwrap();
//! let universe = Universe::from_table(table).unwrap();
//!
//! assert_eq!(universe.number_of_assets(), 2);
//! assert_eq!(universe.ids(), &[AssetId::Integer(1), AssetId::Integer(2)]);
//! ```

use std::collections::HashSet;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CorefolioError, Result};
use crate::table::{Column, ColumnData, Table};

/// Default name of the identifier column.
pub const DEFAULT_ID_COLUMN: &str = "ID";

/// Identifier of one asset, taken from the identifier column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AssetId {
    Integer(i64),
    Text(String),
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetId::Integer(id) => write!(f, "{}", id),
            AssetId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for AssetId {
    fn from(id: i64) -> Self {
        AssetId::Integer(id)
    }
}

impl From<&str> for AssetId {
    fn from(id: &str) -> Self {
        AssetId::Text(id.to_string())
    }
}

impl From<String> for AssetId {
    fn from(id: String) -> Self {
        AssetId::Text(id)
    }
}

/// Candidate assets available for selection.
///
/// The table is immutable once the universe is built: [`Universe::table`]
/// only hands out a shared borrow and [`Universe::to_table`] a deep copy.
#[derive(Debug, Clone)]
pub struct Universe {
    table: Table,
    id_column: String,
    ids: Vec<AssetId>,
    number_of_assets: usize,
}

impl Universe {
    /// Validates `table` and builds a universe keyed by `id_column`.
    ///
    /// # Errors
    ///
    /// Returns [`CorefolioError::Validation`] if any cell is missing, if the
    /// identifier column holds floats, or if identifiers repeat.
    pub fn new(mut table: Table, id_column: impl Into<String>) -> Result<Self> {
        let id_column = id_column.into();

        if table.has_missing() {
            return Err(CorefolioError::Validation(
                "table contains missing values".to_string(),
            ));
        }

        if !table.contains_column(&id_column) {
            let n = table.num_rows() as i64;
            table.push_column(Column::integer(id_column.clone(), 1..=n))?;
        }

        let ids = extract_ids(&table, &id_column)?;
        let mut seen = HashSet::with_capacity(ids.len());
        if !ids.iter().all(|id| seen.insert(id)) {
            return Err(CorefolioError::Validation(
                "table contains duplicate IDs".to_string(),
            ));
        }
        let number_of_assets = seen.len();

        Ok(Self {
            table,
            id_column,
            ids,
            number_of_assets,
        })
    }

    /// Builds a universe keyed by the default `"ID"` column.
    pub fn from_table(table: Table) -> Result<Self> {
        Self::new(table, DEFAULT_ID_COLUMN)
    }

    /// Returns a deep copy of the table.
    pub fn to_table(&self) -> Table {
        self.table.clone()
    }

    /// Borrows the table without copying.
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    /// Identifiers in row order.
    pub fn ids(&self) -> &[AssetId] {
        &self.ids
    }

    /// Number of distinct identifiers, computed at construction.
    pub fn number_of_assets(&self) -> usize {
        self.number_of_assets
    }
}

fn extract_ids(table: &Table, id_column: &str) -> Result<Vec<AssetId>> {
    let column = table.column(id_column).ok_or_else(|| {
        CorefolioError::Validation(format!("identifier column '{}' not found", id_column))
    })?;

    // Missing cells were rejected before this point.
    match column.data() {
        ColumnData::Integer(values) => Ok(values
            .iter()
            .flatten()
            .map(|&v| AssetId::Integer(v))
            .collect()),
        ColumnData::Text(values) => Ok(values
            .iter()
            .flatten()
            .map(|v| AssetId::Text(v.clone()))
            .collect()),
        ColumnData::Float(_) => Err(CorefolioError::Validation(format!(
            "identifier column '{}' must hold integer or text values",
            id_column
        ))),
    }
}
