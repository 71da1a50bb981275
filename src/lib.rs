//! Column order and freeze state for spreadsheet-style grids.
//!
//! [`data::freeze_state::FreezeStateManager`] owns the mapping between a
//! column's physical index and its visual position together with the count
//! of columns frozen to the left edge. Context menu actions in [`ui`] read
//! that state to decide their visibility and call into it when clicked.

pub mod config;
pub mod data;
pub mod error;
pub mod grid;
pub mod i18n;
pub mod logging;
pub mod ui;

pub use data::column_order::ColumnOrderMap;
pub use data::freeze_state::{
    FreezeOutcome, FreezeSnapshot, FreezeStateManager, UnfreezePlacement,
};
pub use error::{FreezeError, Result};
pub use grid::Grid;
