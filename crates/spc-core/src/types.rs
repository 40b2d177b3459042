// File: crates/spc-core/src/types.rs
// Summary: Shared row-level types (row keys and x-axis tick labels).

/// Identity of one retained row.
/// Contract: `x` is the dense position after filtering, `id` the original row index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowKey {
    pub x: usize,
    pub id: usize,
    pub label: String,
}

impl RowKey {
    pub fn new(x: usize, id: usize, label: impl Into<String>) -> Self {
        Self { x, id, label: label.into() }
    }
}

/// Category label shown under one x position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickLabel {
    pub x: usize,
    pub label: String,
}
