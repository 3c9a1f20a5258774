//! Importance index (C9): priority-keyed index for decay/eviction.

use std::collections::{BTreeMap, HashSet};

use crate::handle::Handle;

#[derive(Debug, Default)]
pub(crate) struct ImportanceIndex {
    by_importance: BTreeMap<i64, HashSet<Handle>>,
}

impl ImportanceIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, importance: i64, handle: Handle) {
        self.by_importance
            .entry(importance)
            .or_default()
            .insert(handle);
    }

    pub(crate) fn remove(&mut self, importance: i64, handle: Handle) {
        if let Some(set) = self.by_importance.get_mut(&importance) {
            set.remove(&handle);
            if set.is_empty() {
                self.by_importance.remove(&importance);
            }
        }
    }

    /// Removes every handle for which `predicate` holds, regardless of its
    /// importance bucket. Used by the decay sweep (§4.9); unlike `extract`,
    /// this bulk path never checks the incoming-set invariant.
    pub(crate) fn remove_where(&mut self, predicate: impl Fn(Handle) -> bool) {
        self.by_importance.retain(|_, set| {
            set.retain(|&h| !predicate(h));
            !set.is_empty()
        });
    }

    /// The `limit` least-important handles, ascending. Used by an external
    /// eviction policy deciding what to consider for decay next; the core
    /// itself never calls this.
    pub(crate) fn least_important(&self, limit: usize) -> Vec<Handle> {
        self.by_importance
            .values()
            .flatten()
            .copied()
            .take(limit)
            .collect()
    }

    pub(crate) fn clear(&mut self) {
        self.by_importance.clear();
    }
}
