//! Node index (C4): `(type, name) -> handle` exact lookup.

use std::collections::HashMap;

use crate::handle::Handle;
use crate::types::TypeId;

#[derive(Debug, Default)]
pub(crate) struct NodeIndex {
    by_key: HashMap<(TypeId, String), Handle>,
}

impl NodeIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, atom_type: TypeId, name: &str, handle: Handle) {
        self.by_key.insert((atom_type, name.to_owned()), handle);
    }

    pub(crate) fn remove(&mut self, atom_type: TypeId, name: &str) {
        self.by_key.remove(&(atom_type, name.to_owned()));
    }

    pub(crate) fn get(&self, atom_type: TypeId, name: &str) -> Option<Handle> {
        self.by_key.get(&(atom_type, name.to_owned())).copied()
    }

    pub(crate) fn clear(&mut self) {
        self.by_key.clear();
    }
}
