//! Error types for column order and freeze operations.

/// Errors raised by the column order map and the freeze state manager.
///
/// Every variant is raised before any state is touched, so a failed call
/// leaves the grid exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FreezeError {
    /// Column index outside `[0, column_count)`.
    #[error("Column {column} out of bounds (grid has {column_count} columns)")]
    InvalidColumn { column: usize, column_count: usize },

    /// A proposed visual order is not a permutation of the column set.
    #[error("Invalid column order: {0}")]
    InvalidOrder(String),

    /// A menu action ran without a selected column to act on.
    #[error("No column selected for '{0}'")]
    NoSelection(&'static str),

    /// A proposed frozen-column count exceeds the number of columns.
    #[error("Cannot freeze {fixed} columns in a grid of {column_count}")]
    InvalidBoundary { fixed: usize, column_count: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FreezeError>;
