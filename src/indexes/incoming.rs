//! Incoming index (C7): `handle -> set of links referencing it`.
//!
//! Maintained as a derived invariant of the link population (I3): every
//! link insertion adds itself to the incoming set of each handle in its
//! outgoing tuple, and every link removal undoes exactly that.

use std::collections::{HashMap, HashSet};

use crate::handle::Handle;

#[derive(Debug, Default)]
pub(crate) struct IncomingIndex {
    by_target: HashMap<Handle, HashSet<Handle>>,
}

impl IncomingIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers `link` as referencing every handle in `outgoing`. A handle
    /// repeated within `outgoing` is only inserted once per target (the
    /// incoming *set* de-duplicates even if the outgoing *tuple* does not).
    pub(crate) fn insert_link(&mut self, link: Handle, outgoing: &[Handle]) {
        for &target in outgoing {
            self.by_target.entry(target).or_default().insert(link);
        }
    }

    pub(crate) fn remove_link(&mut self, link: Handle, outgoing: &[Handle]) {
        for target in outgoing {
            if let Some(set) = self.by_target.get_mut(target) {
                set.remove(&link);
            }
        }
    }

    pub(crate) fn get(&self, handle: Handle) -> HashSet<Handle> {
        self.by_target.get(&handle).cloned().unwrap_or_default()
    }

    pub(crate) fn clear(&mut self) {
        self.by_target.clear();
    }
}
