//! Project layer tests
//!
//! - Loading addon trees from real directories

pub mod tests_workspace_loading;
