//! Memoized views stamped with modification-tracker values.
//!
//! An entry is reused only while every counter it was computed against still
//! has the same value. Computation happens outside the lock; a result whose
//! stamp moved while it was being computed is returned to the caller but not
//! stored.

use std::fmt;
use std::hash::Hash;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::base::ModificationTracker;

/// Snapshot of the counters a cached value depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DependencyStamp(Vec<u64>);

impl DependencyStamp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(trackers: &[&ModificationTracker]) -> Self {
        Self(trackers.iter().map(|t| t.modification_count()).collect())
    }

    pub fn with(mut self, value: u64) -> Self {
        self.0.push(value);
        self
    }

    pub fn values(&self) -> &[u64] {
        &self.0
    }
}

impl From<u64> for DependencyStamp {
    fn from(value: u64) -> Self {
        Self(vec![value])
    }
}

/// Side table of derived values keyed by `K`.
pub struct StampedCache<K, V> {
    name: &'static str,
    entries: RwLock<FxHashMap<K, (DependencyStamp, V)>>,
}

impl<K, V> StampedCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: RwLock::new(FxHashMap::default()),
        }
    }

    /// Return the cached value for `key` if its stamp is current, otherwise
    /// compute, store and return a fresh one.
    ///
    /// `stamp` is evaluated before and after `compute`.
    pub fn get_or_compute(
        &self,
        key: &K,
        stamp: impl Fn() -> DependencyStamp,
        compute: impl FnOnce() -> V,
    ) -> V {
        let before = stamp();
        if let Some((stored, value)) = self.entries.read().get(key)
            && *stored == before
        {
            return value.clone();
        }

        trace!(cache = self.name, ?key, "cache miss");
        let value = compute();

        let after = stamp();
        if after == before {
            self.entries
                .write()
                .insert(key.clone(), (after, value.clone()));
        } else {
            trace!(cache = self.name, ?key, "stamp moved during computation, not caching");
        }
        value
    }

    /// Cached value for `key` if present and current.
    pub fn get(&self, key: &K, stamp: &DependencyStamp) -> Option<V> {
        self.entries
            .read()
            .get(key)
            .filter(|(stored, _)| stored == stamp)
            .map(|(_, value)| value.clone())
    }

    pub fn invalidate(&self, key: &K) {
        self.entries.write().remove(key);
    }

    /// Drop every entry for which `keep` returns false.
    pub fn retain(&self, mut keep: impl FnMut(&K) -> bool) {
        self.entries.write().retain(|k, _| keep(k));
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> fmt::Debug for StampedCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StampedCache")
            .field("name", &self.name)
            .field("len", &self.entries.read().len())
            .finish()
    }
}
