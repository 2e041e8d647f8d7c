//! Shared test helpers.

pub mod addon_tree;
pub mod fixtures;
