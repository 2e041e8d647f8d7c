//! IDE layer tests
//!
//! - Reference detection and resolution through `Analysis`
//! - Completion variants
//! - Addon import resolution
//! - Inheritance search

pub mod tests_completion;
pub mod tests_imports;
pub mod tests_references;
pub mod tests_search;
