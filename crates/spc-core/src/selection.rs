// File: crates/spc-core/src/selection.rs
// Summary: Host selection-identity builder seam used for cross-highlighting.

use crate::input::CategoryColumn;

/// Builds the host's opaque selection identity for one original input row.
pub trait SelectionIdBuilder {
    type Id;
    fn build_selection_id(&self, categories: &CategoryColumn, row_id: usize) -> Self::Id;
}

/// Category column name plus original row index.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectionId {
    pub column: String,
    pub row: usize,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CategorySelection;

impl SelectionIdBuilder for CategorySelection {
    type Id = SelectionId;

    fn build_selection_id(&self, categories: &CategoryColumn, row_id: usize) -> SelectionId {
        SelectionId { column: categories.name.clone(), row: row_id }
    }
}
