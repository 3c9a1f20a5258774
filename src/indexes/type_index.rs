//! Type index (C6): `type -> set of handles of that exact type`.
//!
//! Subclass queries are served by the query engine unioning this index's
//! entries across `childrenRecursive(t) ∪ {t}` (§4.5); this index itself
//! only ever stores exact-type membership.

use std::collections::{HashMap, HashSet};

use crate::handle::Handle;
use crate::types::TypeId;

#[derive(Debug, Default)]
pub(crate) struct TypeIndex {
    by_type: HashMap<TypeId, HashSet<Handle>>,
}

impl TypeIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Eagerly allocates an empty bucket for a newly registered type. Called
    /// from the `typeAdded` subscriber; without it a type with no members
    /// yet is simply absent from the map, which `exact` already handles, so
    /// this is purely a "never see a missing bucket" convenience, not a
    /// correctness requirement the way the original's array resize was.
    pub(crate) fn on_type_added(&mut self, t: TypeId) {
        self.by_type.entry(t).or_default();
    }

    pub(crate) fn insert(&mut self, t: TypeId, handle: Handle) {
        self.by_type.entry(t).or_default().insert(handle);
    }

    pub(crate) fn remove(&mut self, t: TypeId, handle: Handle) {
        if let Some(set) = self.by_type.get_mut(&t) {
            set.remove(&handle);
        }
    }

    pub(crate) fn exact(&self, t: TypeId) -> HashSet<Handle> {
        self.by_type.get(&t).cloned().unwrap_or_default()
    }

    pub(crate) fn clear(&mut self) {
        self.by_type.clear();
    }
}
