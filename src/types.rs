//! The type lattice (C2): `isA`, recursive child enumeration, and the
//! `typeAdded` signal that type-keyed indexes subscribe to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An integer drawn from a dynamically extensible type lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeId(u32);

impl TypeId {
    pub(crate) const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub(crate) const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type#{}", self.0)
    }
}

/// The lattice root. Every type is a descendant of `ATOM`.
pub const ATOM: TypeId = TypeId(0);
/// Immediate child of `ATOM`; every `Node` subtype descends from this.
pub const NODE: TypeId = TypeId(1);
/// Immediate child of `ATOM`; every `Link` subtype descends from this.
pub const LINK: TypeId = TypeId(2);

struct Entry {
    name: String,
    parent: TypeId,
    children: Vec<TypeId>,
}

/// Subscribers are notified synchronously, under the same write guard that
/// registers the new type (see the crate's concurrency model), so no query
/// can observe a type before the subscriber list has resized for it.
type Subscriber = Box<dyn FnMut(TypeId) + Send>;

/// Holds the parent/child relation over types and answers `isA`/`childrenRecursive`.
///
/// Owned per-[`AtomTable`](crate::table::AtomTable) rather than as a process
/// singleton: the core has no requirement to share a type lattice across
/// tables, and a per-table lattice keeps `typeAdded` delivery trivially
/// ordered with respect to that table's own indexes.
pub struct TypeRegistry {
    entries: Vec<Entry>,
    by_name: std::collections::HashMap<String, TypeId>,
    subscribers: Vec<Subscriber>,
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("type_count", &self.entries.len())
            .finish()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates a registry pre-seeded with `ATOM`, `NODE`, and `LINK`.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            entries: Vec::new(),
            by_name: std::collections::HashMap::new(),
            subscribers: Vec::new(),
        };
        let atom = registry.push_entry("Atom", ATOM);
        debug_assert_eq!(atom, ATOM);
        let node = registry.push_entry("Node", ATOM);
        debug_assert_eq!(node, NODE);
        let link = registry.push_entry("Link", ATOM);
        debug_assert_eq!(link, LINK);
        registry.entries[ATOM.raw() as usize].children.push(NODE);
        registry.entries[ATOM.raw() as usize].children.push(LINK);
        registry
    }

    fn push_entry(&mut self, name: &str, parent: TypeId) -> TypeId {
        let id = TypeId(self.entries.len() as u32);
        self.entries.push(Entry {
            name: name.to_owned(),
            parent,
            children: Vec::new(),
        });
        self.by_name.insert(name.to_owned(), id);
        id
    }

    /// Registers a new type as a child of `parent`, firing the `typeAdded`
    /// signal to every subscriber before returning.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not name an existing type, or if `name` is
    /// already registered.
    pub fn add_type(&mut self, name: &str, parent: TypeId) -> TypeId {
        assert!(
            (parent.raw() as usize) < self.entries.len(),
            "unknown parent type {parent:?}"
        );
        assert!(
            !self.by_name.contains_key(name),
            "type {name:?} already registered"
        );
        let id = self.push_entry(name, parent);
        self.entries[parent.raw() as usize].children.push(id);
        for subscriber in &mut self.subscribers {
            subscriber(id);
        }
        id
    }

    /// Looks up a type by its registered name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// Returns the human-readable name a type was registered with.
    #[must_use]
    pub fn name_of(&self, t: TypeId) -> Option<&str> {
        self.entries.get(t.raw() as usize).map(|e| e.name.as_str())
    }

    /// The number of registered types, including the three seeded ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` only for a freshly constructed registry; never true once any
    /// caller has registered a type, since `ATOM`/`NODE`/`LINK` always exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Registers a callback invoked with the new type's id every time
    /// [`add_type`](Self::add_type) runs.
    pub(crate) fn subscribe(&mut self, callback: Subscriber) {
        self.subscribers.push(callback);
    }

    /// `true` iff `sub` is `sup` or a transitive child of `sup`.
    #[must_use]
    pub fn is_a(&self, sub: TypeId, sup: TypeId) -> bool {
        if sub == sup {
            return true;
        }
        let mut current = sub;
        loop {
            let parent = self.entries[current.raw() as usize].parent;
            if parent == current {
                // Reached the root without finding `sup`.
                return false;
            }
            if parent == sup {
                return true;
            }
            current = parent;
        }
    }

    /// All proper descendants of `t`, in breadth-first order.
    #[must_use]
    pub fn children_recursive(&self, t: TypeId) -> Vec<TypeId> {
        let mut result = Vec::new();
        let mut frontier = self.entries[t.raw() as usize].children.clone();
        while let Some(child) = frontier.pop() {
            result.push(child);
            frontier.extend(self.entries[child.raw() as usize].children.iter().copied());
        }
        result
    }
}
