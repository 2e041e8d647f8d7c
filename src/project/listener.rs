//! Modification listener: turns file changes into tracker bumps.

use std::path::Path;

use tracing::trace;

use crate::base::ModuleTrackers;

use super::Vfs;
use super::discovery::{find_owning_module, is_manifest_file, module_name};

/// Record a change to the file at `path`.
///
/// Must be called while `vfs` still describes a tree containing the file:
/// after inserting a new file, before removing an old one. Bumps the
/// project counter, the owning module's structure counter and, for a
/// manifest, the module's manifest counter.
pub fn file_changed(vfs: &Vfs, trackers: &ModuleTrackers, path: &Path) {
    trackers.project.increment();

    let Some(dir) = find_owning_module(vfs, path) else {
        return;
    };
    let Some(name) = module_name(&dir) else {
        return;
    };

    let structure = trackers.structure.get(name).increment();
    trace!(module = name, structure, path = %path.display(), "module structure changed");

    if is_manifest_file(vfs, path) {
        let manifest = trackers.manifest.get(name).increment();
        trace!(module = name, manifest, "module manifest changed");
    }
}
