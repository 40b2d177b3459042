// File: crates/spc-core/src/error.rs
// Summary: Error type shared by input binding, settings parsing and view-model assembly.

use thiserror::Error;

use crate::input::Role;

#[derive(Debug, Error)]
pub enum SpcError {
    /// A mandatory data role is not bound to any value column.
    #[error("missing required data role `{0}`")]
    MissingRole(Role),

    #[error("unknown chart type `{0}`")]
    UnknownChartType(String),

    #[error("invalid colour `{0}`, expected #rrggbb")]
    InvalidColour(String),

    /// The limit engine returned a sequence that does not line up with the series.
    #[error("limit sequence `{name}` has {actual} entries, expected {expected}")]
    MisalignedLimits {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type Result<T, E = SpcError> = std::result::Result<T, E>;
