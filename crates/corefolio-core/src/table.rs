//! Column-oriented tables of asset attributes.
//!
//! A [`Table`] is the tabular input shared by the universe and the
//! constraint compilers. Columns are typed: integer and float columns are
//! numeric, text columns are categorical. A cell is missing when it is `None`
//! or, for float columns, `NaN`.
//!
//! # Example
//!
//! ```
//! use corefolio_core::table::{Column, Table};
//!
//! let table = Table::from_columns(vec![
//!     Column::integer("ID", [1, 2, 3]),
//!     Column::float("value", [10.0, 20.0, 30.0]),
//!     Column::text("sector", ["tech", "energy", "tech"]),
//! ])
//! .unwrap();
//!
//! assert_eq!(table.num_rows(), 3);
//! assert!(table.column("value").unwrap().data().is_numeric());
//! assert!(!table.has_missing());
//! ```

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CorefolioError, Result};

/// Type of the values stored in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Integer => "integer",
            ColumnKind::Float => "float",
            ColumnKind::Text => "text",
        };
        f.write_str(name)
    }
}

/// Typed cell storage for one column.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ColumnData {
    Integer(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Integer(values) => values.len(),
            ColumnData::Float(values) => values.len(),
            ColumnData::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnData::Integer(_) => ColumnKind::Integer,
            ColumnData::Float(_) => ColumnKind::Float,
            ColumnData::Text(_) => ColumnKind::Text,
        }
    }

    /// Integer and float columns are numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnData::Integer(_) | ColumnData::Float(_))
    }

    /// Counts `None` cells and `NaN` floats.
    pub fn missing_count(&self) -> usize {
        match self {
            ColumnData::Integer(values) => values.iter().filter(|v| v.is_none()).count(),
            ColumnData::Float(values) => values
                .iter()
                .filter(|v| v.map_or(true, f64::is_nan))
                .count(),
            ColumnData::Text(values) => values.iter().filter(|v| v.is_none()).count(),
        }
    }

    /// Returns the cells as `f64`, or `None` when the column is not numeric
    /// or has a missing cell.
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        match self {
            ColumnData::Integer(values) => values.iter().map(|v| v.map(|x| x as f64)).collect(),
            ColumnData::Float(values) => values
                .iter()
                .map(|v| v.filter(|x| !x.is_nan()))
                .collect(),
            ColumnData::Text(_) => None,
        }
    }

    /// Returns the cells as string slices, or `None` when the column is not
    /// text or has a missing cell.
    pub fn text_values(&self) -> Option<Vec<&str>> {
        match self {
            ColumnData::Text(values) => values.iter().map(|v| v.as_deref()).collect(),
            _ => None,
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Creates a fully populated integer column.
    pub fn integer(name: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        Self::new(
            name,
            ColumnData::Integer(values.into_iter().map(Some).collect()),
        )
    }

    /// Creates a float column. `NaN` entries count as missing.
    pub fn float(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(name, ColumnData::Float(values.into_iter().map(Some).collect()))
    }

    /// Creates a fully populated text column.
    pub fn text<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(
            name,
            ColumnData::Text(values.into_iter().map(|v| Some(v.into())).collect()),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A rectangular, column-oriented table.
///
/// Every column has the same number of rows and column names are unique.
/// Cloning performs a deep copy.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Column>", into = "Vec<Column>")
)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    /// Creates an empty table with no columns and no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from columns.
    ///
    /// # Errors
    ///
    /// Returns [`CorefolioError::Validation`] if column lengths differ or a
    /// column name repeats.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut table = Self::new();
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Appends a column after the existing ones.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if self.contains_column(column.name()) {
            return Err(CorefolioError::Validation(format!(
                "duplicate column name '{}'",
                column.name()
            )));
        }
        if !self.columns.is_empty() && column.len() != self.rows {
            return Err(CorefolioError::Validation(format!(
                "column '{}' has {} rows, expected {}",
                column.name(),
                column.len(),
                self.rows
            )));
        }
        self.rows = column.len();
        self.columns.push(column);
        Ok(())
    }

    /// Builder form of [`Table::push_column`].
    pub fn with_column(mut self, column: Column) -> Result<Self> {
        self.push_column(column)?;
        Ok(self)
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    /// Returns true if any cell in any column is missing.
    pub fn has_missing(&self) -> bool {
        self.columns.iter().any(|c| c.data().missing_count() > 0)
    }
}

impl TryFrom<Vec<Column>> for Table {
    type Error = CorefolioError;

    fn try_from(columns: Vec<Column>) -> Result<Self> {
        Table::from_columns(columns)
    }
}

impl From<Table> for Vec<Column> {
    fn from(table: Table) -> Self {
        table.columns
    }
}
