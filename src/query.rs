//! The query engine (C11): simple index lookups plus the compound
//! positional/by-name queries of §4.8, composed by set intersection.

use std::collections::HashSet;

use crate::atom::AtomKind;
use crate::error::{Error, Result};
use crate::handle::Handle;
use crate::table::AtomTableInner;
use crate::truth::SimpleTruthValue;
use crate::types::{TypeId, ATOM, LINK};

/// A predicate over an atom's current truth value, used to narrow a query's
/// results to a particular belief context. `None` accepts everything.
pub type VersionFilter<'a> = Option<&'a dyn Fn(&SimpleTruthValue) -> bool>;

fn version_ok(tv: &SimpleTruthValue, filter: VersionFilter<'_>) -> bool {
    filter.map_or(true, |f| f(tv))
}

/// A single outgoing-tuple slot for the compound positional query (§4.8.2).
#[derive(Debug, Clone)]
pub enum OutgoingSlot {
    /// Slot `i` must equal this exact handle.
    Handle(Handle),
    /// Slot `i`'s occupant must have this type (optionally any subtype).
    Type {
        /// The required type.
        type_id: TypeId,
        /// Whether proper subtypes of `type_id` also match.
        subclass: bool,
    },
    /// Slot `i` is unconstrained.
    Any,
}

/// A single slot for the compound by-name query (§4.8.3).
#[derive(Debug, Clone)]
pub struct NameSlot {
    /// The required type of slot `i`'s occupant, if any.
    pub type_id: Option<TypeId>,
    /// The required name of slot `i`'s occupant, if any. Requires `type_id`
    /// to also be set -- a name without a type is rejected as
    /// [`Error::InvalidQuery`].
    pub name: Option<String>,
    /// Whether proper subtypes of `type_id` also match.
    pub subclass: bool,
}

impl NameSlot {
    /// An unconstrained slot.
    #[must_use]
    pub fn any() -> Self {
        Self {
            type_id: None,
            name: None,
            subclass: false,
        }
    }

    /// A slot constrained only by type.
    #[must_use]
    pub fn of_type(type_id: TypeId, subclass: bool) -> Self {
        Self {
            type_id: Some(type_id),
            name: None,
            subclass,
        }
    }

    /// A slot constrained by both type and name.
    #[must_use]
    pub fn named(type_id: TypeId, name: impl Into<String>, subclass: bool) -> Self {
        Self {
            type_id: Some(type_id),
            name: Some(name.into()),
            subclass,
        }
    }
}

impl AtomTableInner {
    /// `getByType` (§4.8.1): union of the type index's exact-type entries
    /// for `t` and, when `subclass`, every proper descendant of `t`.
    pub(crate) fn get_by_type(&self, t: TypeId, subclass: bool) -> HashSet<Handle> {
        let mut result = self.type_index.exact(t);
        if subclass {
            for child in self.types.children_recursive(t) {
                result.extend(self.type_index.exact(child));
            }
        }
        result
    }

    fn type_matches(&self, atom_type: TypeId, constraint: TypeId, subclass: bool) -> bool {
        if subclass {
            self.types.is_a(atom_type, constraint)
        } else {
            atom_type == constraint
        }
    }

    fn outgoing_of(&self, handle: Handle) -> Option<(TypeId, &AtomKind)> {
        self.arena
            .resolve(handle)
            .map(|atom| (atom.atom_type(), atom.kind()))
    }

    /// `true` iff `link` resolves, is live, and its own type matches
    /// `(link_type, subclass)` -- unless `link_type == ATOM && subclass`,
    /// in which case every live atom matches (§4.8.2 step 4's carve-out).
    fn satisfies_link_type(&self, link: Handle, link_type: TypeId, subclass: bool) -> bool {
        if link_type == ATOM && subclass {
            return self.arena.valid(link);
        }
        self.arena
            .resolve(link)
            .is_some_and(|atom| self.type_matches(atom.atom_type(), link_type, subclass))
    }

    /// Narrows each candidate set to atoms satisfying the link-type
    /// constraint, *before* intersection, per §4.8.2 step 4's explicit
    /// performance contract (and its own precondition: skip narrowing
    /// entirely for `ATOM`-with-subclass, which matches everything anyway).
    fn prefilter_by_link_type(
        &self,
        sets: Vec<HashSet<Handle>>,
        link_type: TypeId,
        subclass: bool,
    ) -> Vec<HashSet<Handle>> {
        if link_type == ATOM && subclass {
            return sets;
        }
        sets.into_iter()
            .map(|set| {
                set.into_iter()
                    .filter(|&h| self.satisfies_link_type(h, link_type, subclass))
                    .collect()
            })
            .collect()
    }

    fn intersect_all(sets: Vec<HashSet<Handle>>) -> HashSet<Handle> {
        let mut iter = sets.into_iter();
        let Some(first) = iter.next() else {
            return HashSet::new();
        };
        iter.fold(first, |acc, set| acc.intersection(&set).copied().collect())
    }

    /// The full compound positional query, §4.8.2.
    pub(crate) fn get_by_outgoing(
        &self,
        slots: &[OutgoingSlot],
        link_type: TypeId,
        subclass: bool,
        version_filter: VersionFilter<'_>,
    ) -> Result<HashSet<Handle>> {
        let arity = slots.len();

        // Fast path: every slot is a specified, valid handle.
        if self.types.is_a(link_type, LINK) && !subclass && arity > 0 {
            let all_handles: Option<Vec<Handle>> = slots
                .iter()
                .map(|slot| match slot {
                    OutgoingSlot::Handle(h) if self.arena.valid(*h) => Some(*h),
                    _ => None,
                })
                .collect();
            if let Some(handles) = all_handles {
                return Ok(match self.link_index.get(link_type, &handles) {
                    Some(h) if version_ok(self.arena.resolve(h).unwrap().truth_value(), version_filter) => {
                        std::iter::once(h).collect()
                    }
                    _ => HashSet::new(),
                });
            }
        }

        // Zero-arity path.
        if self.types.is_a(link_type, LINK) && arity == 0 {
            let candidates = self.get_by_type(link_type, subclass);
            let result = candidates
                .into_iter()
                .filter(|&h| {
                    self.arena.resolve(h).is_some_and(|atom| {
                        atom.kind().arity() == 0 && version_ok(atom.truth_value(), version_filter)
                    })
                })
                .collect();
            return Ok(result);
        }

        // General path.
        let mut constrained_positions = Vec::new();
        let mut sets = Vec::new();
        for (i, slot) in slots.iter().enumerate() {
            let set = match slot {
                OutgoingSlot::Handle(h) => {
                    if !self.arena.valid(*h) {
                        return Ok(HashSet::new());
                    }
                    let candidates: HashSet<Handle> = self
                        .incoming_index
                        .get(*h)
                        .into_iter()
                        .filter(|&l| {
                            self.outgoing_of(l)
                                .and_then(|(_, kind)| kind.outgoing())
                                .is_some_and(|out| out.len() == arity && out[i] == *h)
                        })
                        .collect();
                    candidates
                }
                OutgoingSlot::Type { type_id, subclass } => {
                    let mut candidates = self.target_type_index.get(i, *type_id);
                    if *subclass {
                        for child in self.types.children_recursive(*type_id) {
                            candidates.extend(self.target_type_index.get(i, child));
                        }
                    }
                    candidates
                }
                OutgoingSlot::Any => continue,
            };
            if set.is_empty() {
                return Ok(HashSet::new());
            }
            constrained_positions.push(i);
            sets.push(set);
        }

        if sets.is_empty() {
            return Err(Error::InvalidQuery(
                "getByOutgoing: no tuple and no constrained slot",
            ));
        }

        let sets = self.prefilter_by_link_type(sets, link_type, subclass);
        let candidates = Self::intersect_all(sets);

        let result = candidates
            .into_iter()
            .filter(|&h| {
                let Some(atom) = self.arena.resolve(h) else {
                    return false;
                };
                if !version_ok(atom.truth_value(), version_filter) {
                    return false;
                }
                let Some(out) = atom.kind().outgoing() else {
                    return false;
                };
                if out.len() != arity {
                    return false;
                }
                constrained_positions.iter().all(|&i| match &slots[i] {
                    OutgoingSlot::Type { type_id, subclass } => self
                        .outgoing_of(out[i])
                        .is_some_and(|(t, _)| self.type_matches(t, *type_id, *subclass)),
                    OutgoingSlot::Handle(h) => out[i] == *h,
                    OutgoingSlot::Any => true,
                })
            })
            .collect();
        Ok(result)
    }

    /// The compound by-name query, §4.8.3.
    pub(crate) fn get_by_names(
        &self,
        slots: &[NameSlot],
        link_type: TypeId,
        subclass: bool,
    ) -> Result<HashSet<Handle>> {
        let arity = slots.len();
        let mut constrained_positions = Vec::new();
        let mut sets = Vec::new();

        for (i, slot) in slots.iter().enumerate() {
            if slot.name.is_some() && slot.type_id.is_none() {
                return Err(Error::InvalidQuery(
                    "getByNames: name constraint without a type",
                ));
            }
            let Some(type_id) = slot.type_id else {
                continue;
            };

            let set = if let Some(name) = &slot.name {
                let mut node_handles = Vec::new();
                if let Some(h) = self.node_index.get(type_id, name) {
                    node_handles.push(h);
                }
                if slot.subclass {
                    for child in self.types.children_recursive(type_id) {
                        if let Some(h) = self.node_index.get(child, name) {
                            node_handles.push(h);
                        }
                    }
                }
                let mut candidates = HashSet::new();
                for node in node_handles {
                    candidates.extend(self.incoming_index.get(node).into_iter().filter(|&l| {
                        self.outgoing_of(l)
                            .and_then(|(_, kind)| kind.outgoing())
                            .is_some_and(|out| out.len() == arity && out[i] == node)
                    }));
                }
                candidates
            } else {
                let mut candidates = self.target_type_index.get(i, type_id);
                if slot.subclass {
                    for child in self.types.children_recursive(type_id) {
                        candidates.extend(self.target_type_index.get(i, child));
                    }
                }
                candidates
            };

            if set.is_empty() {
                return Ok(HashSet::new());
            }
            constrained_positions.push(i);
            sets.push(set);
        }

        if sets.is_empty() {
            return Err(Error::InvalidQuery(
                "getByNames: no constrained slot",
            ));
        }

        let sets = self.prefilter_by_link_type(sets, link_type, subclass);
        let candidates = Self::intersect_all(sets);

        let result = candidates
            .into_iter()
            .filter(|&h| {
                let Some(atom) = self.arena.resolve(h) else {
                    return false;
                };
                let Some(out) = atom.kind().outgoing() else {
                    return false;
                };
                if out.len() != arity {
                    return false;
                }
                constrained_positions.iter().all(|&i| {
                    let slot = &slots[i];
                    let Some(type_id) = slot.type_id else {
                        return true;
                    };
                    let Some((atom_type, kind)) = self.outgoing_of(out[i]) else {
                        return false;
                    };
                    if !self.type_matches(atom_type, type_id, slot.subclass) {
                        return false;
                    }
                    match (&slot.name, kind) {
                        (None, _) => true,
                        (Some(name), AtomKind::Node { name: actual }) => name == actual,
                        (Some(_), AtomKind::Link { .. }) => false,
                    }
                })
            })
            .collect();
        Ok(result)
    }
}
