//! Data layer for column ordering and freeze state
//!
//! This module owns the column order map and the frozen-column boundary.
//! Presentation code only reads from it.

pub mod column_order;
pub mod events;
pub mod freeze_state;
