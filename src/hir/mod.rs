//! High-level IR (HIR): the semantic model of an addons project.
//!
//! All analysis state lives in a [`Database`]. The file set is the only
//! input; everything else is derived from it:
//!
//! ```text
//! file_text(file)                 ← INPUT: raw source text
//!     │
//!     ▼
//! parse(file)                     ← cached per file revision
//!     │
//!     ├──► ManifestDescriptor     ← cached per manifest tracker
//!     └──► ModelDescriptor        ← cached per class pointer
//!             │
//!             ▼
//! ModuleIndex / ModuleDependencyIndex / ModelIndex / FieldIndex
//!             │                   ← updated by reindex_files
//!             ▼
//! Module (closures, scopes) ──► Model (parent / child classes)
//! ```
//!
//! Derived values are memoized in [`StampedCache`]s keyed by
//! [`DependencyStamp`]s; the [`ModuleTrackers`](crate::base::ModuleTrackers)
//! bumped by the project listener invalidate them.

pub mod cache;
mod db;
pub mod descriptors;
pub mod index;
mod model;
mod module;
mod ptr;

pub use cache::{DependencyStamp, StampedCache};
pub use db::Database;
pub use descriptors::{FieldDescriptor, ManifestDescriptor, ModelDescriptor};
pub use index::{
    FieldIndex, FileBasedIndex, IndexExtension, IndexInput, ModelIndex, ModuleDependencyIndex,
    ModuleIndex, SearchScope,
};
pub use model::{Model, classes_by_model_name};
pub use module::Module;
pub use ptr::ClassPtr;
