//! Descriptors: immutable snapshots of what a manifest or a class declares.
//!
//! Parsing is total. Values that are not the expected literal shape fall
//! back to empty, and inputs that declare nothing yield `None`.

mod field;
mod manifest;
mod model;

pub use field::FieldDescriptor;
pub use manifest::ManifestDescriptor;
pub use model::ModelDescriptor;
