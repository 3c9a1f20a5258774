//! Target-type index (C8): `(position, exact target type) -> set of links`.
//!
//! Keyed by position and the *exact* type of the atom occupying that
//! position, regardless of the containing link's own type -- link-type
//! narrowing and target-type subclass expansion are both the query
//! engine's job (§4.8.2 steps 3–4), not this index's.

use std::collections::{HashMap, HashSet};

use crate::handle::Handle;
use crate::types::TypeId;

#[derive(Debug, Default)]
pub(crate) struct TargetTypeIndex {
    by_position_and_type: HashMap<(usize, TypeId), HashSet<Handle>>,
}

impl TargetTypeIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn on_type_added(&mut self, _t: TypeId) {
        // No eager allocation needed: entries are keyed by (position, type)
        // pairs that only exist once some link actually occupies that slot
        // with an atom of that type, so there is no bucket to pre-create
        // for a type in isolation.
    }

    pub(crate) fn insert(&mut self, position: usize, target_type: TypeId, link: Handle) {
        self.by_position_and_type
            .entry((position, target_type))
            .or_default()
            .insert(link);
    }

    pub(crate) fn remove(&mut self, position: usize, target_type: TypeId, link: Handle) {
        if let Some(set) = self.by_position_and_type.get_mut(&(position, target_type)) {
            set.remove(&link);
        }
    }

    pub(crate) fn get(&self, position: usize, target_type: TypeId) -> HashSet<Handle> {
        self.by_position_and_type
            .get(&(position, target_type))
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn clear(&mut self) {
        self.by_position_and_type.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LINK, NODE};

    #[test]
    fn keyed_by_position_and_exact_type() {
        let mut idx = TargetTypeIndex::new();
        let link = Handle::from_index(0);
        idx.insert(0, NODE, link);
        assert!(idx.get(0, NODE).contains(&link));
        assert!(idx.get(1, NODE).is_empty());
        assert!(idx.get(0, LINK).is_empty());
    }
}
