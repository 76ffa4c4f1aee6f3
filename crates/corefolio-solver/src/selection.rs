//! Result of one optimization run.

use corefolio_core::AssetId;

/// Assets chosen by the optimizer, in ascending row order.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    ids: Vec<AssetId>,
    rows: Vec<usize>,
    objective_value: f64,
    backend: &'static str,
}

impl Selection {
    pub(crate) fn new(
        ids: Vec<AssetId>,
        rows: Vec<usize>,
        objective_value: f64,
        backend: &'static str,
    ) -> Self {
        Self {
            ids,
            rows,
            objective_value,
            backend,
        }
    }

    pub fn ids(&self) -> &[AssetId] {
        &self.ids
    }

    /// Row positions of the selected assets in the universe table.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Sum of the value column over the selected rows, without the sense sign.
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    /// Name of the backend that produced this selection.
    pub fn backend(&self) -> &'static str {
        self.backend
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &AssetId) -> bool {
        self.ids.contains(id)
    }

    pub fn into_ids(self) -> Vec<AssetId> {
        self.ids
    }
}
