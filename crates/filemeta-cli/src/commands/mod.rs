//! CLI command implementations

pub mod inventory;
