//! Host capabilities consumed by context menu actions
//!
//! Menu actions never reach into the grid directly. They receive a
//! `&mut dyn GridHost` and only use what is exposed here.

use serde::{Deserialize, Serialize};

/// A cell address in visual coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCoords {
    pub row: usize,
    pub col: usize,
}

impl CellCoords {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Current selection, `from` is where it started and `to` where it ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub from: CellCoords,
    pub to: CellCoords,
}

impl SelectionRange {
    pub fn new(from: CellCoords, to: CellCoords) -> Self {
        Self { from, to }
    }

    /// Whole-column selection of a single visual column
    pub fn column(col: usize) -> Self {
        Self::new(CellCoords::new(0, col), CellCoords::new(0, col))
    }

    /// Selection spanning visual columns `from_col..=to_col`
    pub fn columns(from_col: usize, to_col: usize) -> Self {
        Self::new(CellCoords::new(0, from_col), CellCoords::new(0, to_col))
    }

    /// The selected column if exactly one column is selected
    pub fn single_column(&self) -> Option<usize> {
        (self.from.col == self.to.col).then_some(self.from.col)
    }
}

/// Read-only view of the settings a menu action may consult
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSettings {
    pub fixed_columns_left: usize,
    pub column_count: usize,
}

/// Interface for menu actions to interact with the grid
pub trait GridHost {
    /// Current selection in visual column coordinates
    fn selected_range(&self) -> Option<SelectionRange>;

    /// Current settings; `fixed_columns_left` tracks the freeze state
    fn settings(&self) -> GridSettings;

    /// Request a redraw
    fn render(&mut self);

    /// Request recomputation of frozen-pane overlay geometry
    fn adjust_overlays(&mut self, force: bool);
}
