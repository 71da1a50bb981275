//! User interface layer
//!
//! Context menu actions and the host interface they talk to.

pub mod context_menu;
pub mod freeze_items;
pub mod grid_host;
