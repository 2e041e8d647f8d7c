//! Project layer: the in-memory file set, module discovery, change tracking
//! and loading from disk.

mod config;
pub mod discovery;
pub mod listener;
mod vfs;
pub mod workspace_loader;

pub use config::ProjectConfig;
pub use discovery::{find_owning_module, is_module_directory, manifest_in_directory};
pub use vfs::{Vfs, VfsChange};
pub use workspace_loader::{LoadError, LoadedFiles, WorkspaceLoader};
