//! # odoo-index
//!
//! Module and model resolution for Odoo addon trees: manifest and model
//! parsing, file-based indices, dependency closures and inheritance search.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Editor features (references, completion, imports, search)
//!   ↓
//! hir       → Database, indices, Module and Model entities
//!   ↓
//! project   → File set, module discovery, change listener, disk loading
//!   ↓
//! syntax    → Parsed files, literal evaluation
//!   ↓
//! parser    → Logos lexer, rowan CST, typed AST
//!   ↓
//! base      → Primitives (FileId, TextRange, trackers, constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → project → hir → ide)
// ============================================================================

/// Foundation types: FileId, TextRange, modification trackers
pub mod base;

/// Parser: Logos lexer, rowan CST, typed AST wrappers
pub mod parser;

/// Syntax: parsed files and literal values
pub mod syntax;

/// Project management: file set, module discovery, workspace loading
pub mod project;

/// High-level IR: indices and the module/model semantic model
pub mod hir;

/// IDE features: references, completion, import resolution, search
pub mod ide;

// Re-export foundation types
pub use base::{FileId, LineCol, LineIndex, TextRange, TextSize};
pub use hir::{ClassPtr, Database, Model, Module};
pub use ide::{Analysis, AnalysisHost};
