//! Modification trackers used as cache-validity stamps.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

/// A monotonically increasing counter.
///
/// Readers snapshot [`modification_count`](Self::modification_count) before
/// and after a computation; a moved counter means the result is stale.
#[derive(Default)]
pub struct ModificationTracker {
    count: AtomicU64,
}

impl ModificationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn modification_count(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }

    /// Bump the counter, returning the new value.
    pub fn increment(&self) -> u64 {
        self.count.fetch_add(1, Ordering::AcqRel) + 1
    }
}

impl fmt::Debug for ModificationTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModificationTracker({})", self.modification_count())
    }
}

/// Lazily-created trackers keyed by module name.
///
/// Entries are created on first access and never removed; the module set is
/// bounded by the size of the project.
#[derive(Default)]
pub struct TrackerRegistry {
    trackers: RwLock<FxHashMap<SmolStr, Arc<ModificationTracker>>>,
}

impl TrackerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the tracker for `module`, creating it if needed.
    pub fn get(&self, module: &str) -> Arc<ModificationTracker> {
        // Fast path: already created (read lock)
        if let Some(tracker) = self.trackers.read().get(module) {
            return tracker.clone();
        }

        // Insert-if-absent under the write lock so two racing callers end up
        // sharing one tracker.
        self.trackers
            .write()
            .entry(SmolStr::new(module))
            .or_default()
            .clone()
    }

    /// Current count for `module` (0 for a module never touched).
    pub fn count(&self, module: &str) -> u64 {
        self.trackers
            .read()
            .get(module)
            .map(|t| t.modification_count())
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.trackers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for TrackerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerRegistry")
            .field("count", &self.len())
            .finish()
    }
}

/// The trackers the modification listener maintains.
#[derive(Debug, Default)]
pub struct ModuleTrackers {
    /// Bumped on every change to any file under a module directory.
    pub structure: TrackerRegistry,
    /// Bumped only when a module's manifest file changes.
    pub manifest: TrackerRegistry,
    /// Bumped on every change anywhere in the project.
    pub project: ModificationTracker,
}

impl ModuleTrackers {
    pub fn new() -> Self {
        Self::default()
    }
}
