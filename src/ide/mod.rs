//! IDE features: high-level APIs for editor integrations.
//!
//! This module sits between the semantic model (HIR) and whatever host
//! drives it (a language server, an editor plugin). Each function answers
//! one editor request.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: take a database, return plain data
//! 2. **No protocol types**: conversion happens at the host boundary
//! 3. **Degrade to empty**: unresolved input yields no results, never errors
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```ignore
//! use odoo_index::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! host.set_file_content("/addons/sale/__manifest__.py", "{'depends': ['base']}");
//!
//! let analysis = host.analysis();
//! let sale = analysis.module_by_name("sale");
//! ```

mod analysis;
mod completion;
mod imports;
mod inspections;
mod references;
mod search;

pub use analysis::{Analysis, AnalysisHost};
pub use completion::{CompletionItem, CompletionKind, completions, model_variants, module_variants};
pub use imports::{AddonsMember, ImportTarget, addons_members, resolve_import};
pub use inspections::ignore_no_effect_statement;
pub use references::{
    Reference, ReferenceKind, ReferenceTarget, reference_at, references_in_file,
    resolve_reference,
};
pub use search::{MethodPtr, inheritors, super_methods};
