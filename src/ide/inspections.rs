//! Hooks for host inspections.

use crate::base::FileId;
use crate::hir::Database;
use crate::project::discovery::has_manifest_name;

/// Whether "statement has no effect" warnings are suppressed in `file`.
///
/// A manifest is a bare dictionary expression, so every manifest file is
/// exempt. Files that are gone are exempt as well.
pub fn ignore_no_effect_statement(db: &Database, file: FileId) -> bool {
    db.file_path(file).is_none_or(|path| has_manifest_name(&path))
}
