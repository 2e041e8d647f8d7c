//! HIR layer tests
//!
//! - Module dependency closures and visibility
//! - File scopes and their invalidation
//! - Model inheritance across modules

pub mod tests_cache_invalidation;
pub mod tests_model_inheritance;
pub mod tests_module_closure;
pub mod tests_scopes;
