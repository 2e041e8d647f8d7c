//! Foundation types for the addon indexer.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Interned file identifiers
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`ModificationTracker`], [`TrackerRegistry`] - Cache validity stamps
//! - Domain constants (manifest names, init marker, reserved namespace)
//!
//! This module has NO dependencies on other crate modules.

pub mod constants;
mod file_id;
mod span;
mod tracker;

pub use file_id::FileId;
pub use span::{LineCol, LineIndex, TextRange, TextSize};
pub use tracker::{ModificationTracker, ModuleTrackers, TrackerRegistry};

// Re-export text-size types for convenience
pub use text_size;
