//! Opaque atom identifiers and the arena that resolves them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::atom::Atom;

/// An opaque, totally-ordered, cheaply-copyable identifier for an atom.
///
/// A handle is issued at most once by a given [`AtomTable`](crate::table::AtomTable)
/// and names an arena slot owned by that table. [`Handle::UNDEFINED`] is the
/// distinguished "no handle" sentinel; it never resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Handle(u64);

impl Handle {
    /// The distinguished "no handle" value. Never issued by [`HandleArena::register`].
    pub const UNDEFINED: Self = Self(u64::MAX);

    pub(crate) const fn from_index(index: u64) -> Self {
        Self(index)
    }

    pub(crate) const fn index(self) -> u64 {
        self.0
    }

    /// Returns `true` unless this is [`Handle::UNDEFINED`].
    ///
    /// This is a syntactic check only -- it does not consult any table, so a
    /// handle can be "defined" and still dangling. Use
    /// [`AtomTable::valid`](crate::table::AtomTable::valid) to check liveness.
    #[must_use]
    pub const fn is_defined(self) -> bool {
        self.0 != Self::UNDEFINED.0
    }
}

impl Default for Handle {
    fn default() -> Self {
        Self::UNDEFINED
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_defined() {
            write!(f, "#{}", self.0)
        } else {
            write!(f, "#undefined")
        }
    }
}

/// A single arena slot: either vacant, or occupied by a live atom.
#[derive(Debug)]
enum Slot {
    Vacant,
    Occupied(Atom),
}

/// The atom arena (C1, "handle registry").
///
/// Per the design notes, handles are modeled as arena indices rather than a
/// weak back-reference from atom to table: the table owns a `Vec<Slot>`, and
/// a `Handle` is nothing more than an index into it. This sidesteps the
/// "dereference an extracted handle" hazard by constrution -- extracting an
/// atom vacates its slot, and [`HandleArena::resolve`] on a vacant slot
/// returns `None`.
#[derive(Debug, Default)]
pub(crate) struct HandleArena {
    slots: Vec<Slot>,
}

impl HandleArena {
    pub(crate) fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Registers a brand-new atom and returns the handle it was assigned.
    pub(crate) fn register(&mut self, atom: Atom) -> Handle {
        let index = self.slots.len() as u64;
        self.slots.push(Slot::Occupied(atom));
        Handle::from_index(index)
    }

    /// Registers an atom at a specific, pre-assigned handle (persistence
    /// rehydration). Idempotent: re-registering at an already-occupied slot
    /// with the same structural content succeeds without growing the arena.
    ///
    /// Panics if `handle` falls strictly beyond the current arena and more
    /// than a single slot would need to be skipped -- callers rehydrating
    /// from storage are expected to replay handles in issuance order.
    pub(crate) fn register_at(&mut self, handle: Handle, atom: Atom) {
        let index = handle.index() as usize;
        if index == self.slots.len() {
            self.slots.push(Slot::Occupied(atom));
        } else if index < self.slots.len() {
            self.slots[index] = Slot::Occupied(atom);
        } else {
            panic!("rehydrated handle {handle:?} skips unissued arena slots");
        }
    }

    pub(crate) fn resolve(&self, handle: Handle) -> Option<&Atom> {
        if !handle.is_defined() {
            return None;
        }
        match self.slots.get(handle.index() as usize) {
            Some(Slot::Occupied(atom)) => Some(atom),
            _ => None,
        }
    }

    pub(crate) fn resolve_mut(&mut self, handle: Handle) -> Option<&mut Atom> {
        if !handle.is_defined() {
            return None;
        }
        match self.slots.get_mut(handle.index() as usize) {
            Some(Slot::Occupied(atom)) => Some(atom),
            _ => None,
        }
    }

    pub(crate) fn valid(&self, handle: Handle) -> bool {
        self.resolve(handle).is_some()
    }

    /// Vacates the slot for `handle`, returning the atom that occupied it.
    pub(crate) fn vacate(&mut self, handle: Handle) -> Option<Atom> {
        let index = handle.index() as usize;
        let slot = self.slots.get_mut(index)?;
        match std::mem::replace(slot, Slot::Vacant) {
            Slot::Occupied(atom) => Some(atom),
            Slot::Vacant => None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Occupied(_)))
            .count()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (Handle, &Atom)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            match slot {
                Slot::Occupied(atom) => Some((Handle::from_index(index as u64), atom)),
                Slot::Vacant => None,
            }
        })
    }
}
