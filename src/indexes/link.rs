//! Link index (C5): `(type, outgoing-tuple) -> handle` exact lookup.

use std::collections::HashMap;

use crate::atom::Outgoing;
use crate::handle::Handle;
use crate::types::TypeId;

#[derive(Debug, Default)]
pub(crate) struct LinkIndex {
    by_key: HashMap<(TypeId, Outgoing), Handle>,
}

impl LinkIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, link_type: TypeId, outgoing: &[Handle], handle: Handle) {
        self.by_key
            .insert((link_type, Outgoing::from_slice(outgoing)), handle);
    }

    pub(crate) fn remove(&mut self, link_type: TypeId, outgoing: &[Handle]) {
        self.by_key
            .remove(&(link_type, Outgoing::from_slice(outgoing)));
    }

    pub(crate) fn get(&self, link_type: TypeId, outgoing: &[Handle]) -> Option<Handle> {
        self.by_key
            .get(&(link_type, Outgoing::from_slice(outgoing)))
            .copied()
    }

    pub(crate) fn clear(&mut self) {
        self.by_key.clear();
    }
}
