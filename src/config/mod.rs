//! Configuration module
//!
//! Grid and menu settings loaded from TOML.

pub mod config;
