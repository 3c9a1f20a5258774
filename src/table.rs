//! The mutation engine and public facade (C12): `AtomTable` itself.
//!
//! Wraps the handle arena, type registry, and seven indices behind a single
//! [`crossbeam::sync::ShardedLock`], giving the single-writer/multi-reader
//! scheduling model of the concurrency section: every mutating operation
//! takes the write guard, every query takes the read guard, and the
//! `typeAdded` signal (delivered while that same write guard is held) can
//! never race a reader onto a half-registered type.

use std::collections::HashSet;
use std::sync::Arc;

use crossbeam::sync::ShardedLock;

use crate::atom::{Atom, AtomKind, NewAtom};
use crate::error::{Error, Result};
use crate::handle::{Handle, HandleArena};
use crate::indexes::{
    ImportanceIndex, IncomingIndex, LinkIndex, NodeIndex, PredicateIndex, TargetTypeIndex,
    TypeIndex,
};
use crate::logger::Logger;
use crate::options::AtomTableOptions;
use crate::query::{NameSlot, OutgoingSlot, VersionFilter};
use crate::rng::Rng;
use crate::stats::StatisticsMonitor;
use crate::truth::{SimpleTruthValue, TruthValue as _};
use crate::types::{TypeId, TypeRegistry};

/// The state protected by the table's lock: the arena, the type lattice, and
/// every index. Free functions in `crate::query` add the compound-query
/// methods to this type via a separate `impl` block in that module.
pub(crate) struct AtomTableInner {
    pub(crate) arena: HandleArena,
    pub(crate) types: TypeRegistry,
    pub(crate) node_index: NodeIndex,
    pub(crate) link_index: LinkIndex,
    pub(crate) type_index: TypeIndex,
    pub(crate) incoming_index: IncomingIndex,
    pub(crate) target_type_index: TargetTypeIndex,
    importance_index: ImportanceIndex,
    predicate_index: PredicateIndex,
}

impl AtomTableInner {
    fn new(logger: Logger) -> Self {
        let mut types = TypeRegistry::new();
        // The type-keyed indices are wired up directly in `AtomTable::add_type`
        // rather than through this subscriber mechanism (a closure capturing
        // `&mut` sibling fields of `AtomTableInner` cannot exist in safe Rust).
        // The subscriber list is still genuinely exercised here: it gives the
        // logger a standing hook onto every new type, independent of which
        // indices happen to care.
        types.subscribe(Box::new(move |t| {
            logger.fine(&format!("type {t} registered"));
        }));
        Self {
            arena: HandleArena::new(),
            types,
            node_index: NodeIndex::new(),
            link_index: LinkIndex::new(),
            type_index: TypeIndex::new(),
            incoming_index: IncomingIndex::new(),
            target_type_index: TargetTypeIndex::new(),
            importance_index: ImportanceIndex::new(),
            predicate_index: PredicateIndex::new(),
        }
    }

    fn insert_into_indexes(&mut self, handle: Handle) {
        let atom = self
            .arena
            .resolve(handle)
            .expect("handle was just registered in the arena");
        let atom_type = atom.atom_type();
        let importance = atom.importance();
        let kind = atom.kind().clone();

        self.type_index.insert(atom_type, handle);
        self.importance_index.insert(importance, handle);
        match kind {
            AtomKind::Node { name } => {
                self.node_index.insert(atom_type, &name, handle);
            }
            AtomKind::Link { outgoing } => {
                self.link_index.insert(atom_type, &outgoing, handle);
                self.incoming_index.insert_link(handle, &outgoing);
                for (position, &target) in outgoing.iter().enumerate() {
                    if let Some(target_type) = self.arena.resolve(target).map(Atom::atom_type) {
                        self.target_type_index.insert(position, target_type, handle);
                    }
                }
                if let Some(&head) = outgoing.first() {
                    self.predicate_index.insert(head, handle);
                }
            }
        }
    }

    fn remove_from_indexes(&mut self, handle: Handle) {
        let Some(atom) = self.arena.resolve(handle) else {
            return;
        };
        let atom_type = atom.atom_type();
        let importance = atom.importance();
        let kind = atom.kind().clone();

        self.type_index.remove(atom_type, handle);
        self.importance_index.remove(importance, handle);
        match kind {
            AtomKind::Node { name } => {
                self.node_index.remove(atom_type, &name);
            }
            AtomKind::Link { outgoing } => {
                self.link_index.remove(atom_type, &outgoing);
                self.incoming_index.remove_link(handle, &outgoing);
                for (position, &target) in outgoing.iter().enumerate() {
                    if let Some(target_type) = self.arena.resolve(target).map(Atom::atom_type) {
                        self.target_type_index.remove(position, target_type, handle);
                    }
                }
                if let Some(&head) = outgoing.first() {
                    self.predicate_index.remove(head, handle);
                }
            }
        }
    }

    fn merge_truth_value(&mut self, handle: Handle, incoming: SimpleTruthValue) {
        // §4.10: a null incoming value never overwrites an existing one.
        if incoming.is_null() {
            return;
        }
        if let Some(atom) = self.arena.resolve_mut(handle) {
            let merged = atom.truth_value().merge(&incoming);
            atom.set_truth_value(merged);
        }
    }

    /// §4.9 `add`. `NewAtom` never carries a pre-assigned handle (see
    /// [`add_with_handle`](AtomTableInner::add_with_handle) for rehydration),
    /// so step 1 of the original algorithm ("back-pointer already set")
    /// never applies here by construction.
    fn add(&mut self, candidate: NewAtom) -> Result<Handle> {
        match &candidate.kind {
            AtomKind::Node { name } => {
                if let Some(existing) = self.node_index.get(candidate.atom_type, name) {
                    self.merge_truth_value(existing, candidate.truth_value);
                    return Ok(existing);
                }
            }
            AtomKind::Link { outgoing } => {
                for &target in outgoing.iter() {
                    if !self.arena.valid(target) {
                        return Err(Error::InvalidLink(target));
                    }
                }
                if let Some(existing) = self.link_index.get(candidate.atom_type, outgoing) {
                    self.merge_truth_value(existing, candidate.truth_value);
                    return Ok(existing);
                }
            }
        }
        let atom = Atom::new(candidate.atom_type, candidate.kind, candidate.truth_value);
        let handle = self.arena.register(atom);
        self.insert_into_indexes(handle);
        Ok(handle)
    }

    /// Rehydration entry point (§6, persistence contract): inserts `candidate`
    /// at a caller-supplied handle instead of minting a fresh one, skipping
    /// the merge step. A structural duplicate already occupying that key is
    /// the one case `HandleAlreadyAssigned` actually fires (§7).
    fn add_with_handle(&mut self, handle: Handle, candidate: NewAtom) -> Result<Handle> {
        let duplicate = match &candidate.kind {
            AtomKind::Node { name } => self.node_index.get(candidate.atom_type, name).is_some(),
            AtomKind::Link { outgoing } => {
                self.link_index.get(candidate.atom_type, outgoing).is_some()
            }
        };
        if duplicate {
            return Err(Error::HandleAlreadyAssigned);
        }
        if let AtomKind::Link { outgoing } = &candidate.kind {
            for &target in outgoing.iter() {
                if !self.arena.valid(target) {
                    return Err(Error::InvalidLink(target));
                }
            }
        }
        let atom = Atom::new(candidate.atom_type, candidate.kind, candidate.truth_value);
        self.arena.register_at(handle, atom);
        self.insert_into_indexes(handle);
        Ok(handle)
    }

    /// Builds the transitive removal closure for `handle` without mutating
    /// any index, marking every atom visited along the way. This is the
    /// "transitive closure" half of the §9 design note's
    /// transitive-closure-then-atomic-commit directive: nothing is removed
    /// from an index until the whole closure has been validated.
    fn collect_removal_closure(&mut self, handle: Handle, recursive: bool, pending: &mut HashSet<Handle>) {
        if pending.contains(&handle) {
            return;
        }
        let Some(atom) = self.arena.resolve_mut(handle) else {
            return;
        };
        if atom.is_marked_for_removal() {
            return;
        }
        atom.mark_for_removal();
        pending.insert(handle);
        if recursive {
            let incoming_snapshot: Vec<Handle> = self.incoming_index.get(handle).into_iter().collect();
            for link in incoming_snapshot {
                self.collect_removal_closure(link, recursive, pending);
            }
        }
    }

    /// §4.9 `extract`. Returns the (possibly empty) set of handles that
    /// *would be* removed; callers finalize with
    /// [`remove_extracted`](AtomTableInner::remove_extracted).
    fn extract(&mut self, handle: Handle, recursive: bool, logger: &Logger) -> HashSet<Handle> {
        if !self.arena.valid(handle) {
            return HashSet::new();
        }
        if self
            .arena
            .resolve(handle)
            .is_some_and(Atom::is_marked_for_removal)
        {
            return HashSet::new();
        }

        let mut pending = HashSet::new();
        self.collect_removal_closure(handle, recursive, &mut pending);

        // I4: every member of the closure's incoming set must itself be in
        // the closure, or the whole extraction aborts -- atomically, since
        // nothing has touched an index yet.
        let closure_is_removable = pending.iter().all(|&h| {
            self.incoming_index
                .get(h)
                .iter()
                .all(|incoming_link| pending.contains(incoming_link))
        });

        if !closure_is_removable {
            for &h in &pending {
                if let Some(atom) = self.arena.resolve_mut(h) {
                    atom.unset_removal_mark();
                }
            }
            logger.warn(&format!(
                "cannot extract {handle}: incoming set is non-empty"
            ));
            return HashSet::new();
        }

        for &h in &pending {
            self.remove_from_indexes(h);
        }
        pending
    }

    /// Extends `closure` with `handle` and, transitively, every link in its
    /// incoming set -- a decayed atom invalidates any link that still
    /// references it (I2), and that link's own removal can in turn
    /// invalidate whatever references *it*.
    fn collect_decay_closure(&self, handle: Handle, closure: &mut HashSet<Handle>) {
        if !closure.insert(handle) {
            return;
        }
        for link in self.incoming_index.get(handle) {
            self.collect_decay_closure(link, closure);
        }
    }

    fn purge_decayed(&mut self, logger: &Logger) -> Vec<Atom> {
        let decayed_handles: Vec<Handle> = self
            .arena
            .iter()
            .filter(|(_, atom)| atom.is_decayed())
            .map(|(h, _)| h)
            .collect();

        let mut closure = HashSet::new();
        for handle in decayed_handles {
            self.collect_decay_closure(handle, &mut closure);
        }

        let mut removed = Vec::with_capacity(closure.len());
        for handle in closure {
            if self.arena.resolve(handle).is_none() {
                logger.warn(&format!(
                    "decay sweep: handle {handle} vanished mid-sweep, skipping"
                ));
                continue;
            }
            self.remove_from_indexes(handle);
            if let Some(atom) = self.arena.vacate(handle) {
                removed.push(atom);
            }
        }
        removed
    }

    fn clear(&mut self) -> Vec<Atom> {
        let atoms: Vec<Atom> = self.arena.iter().map(|(_, atom)| atom.clone()).collect();
        self.arena.clear();
        self.node_index.clear();
        self.link_index.clear();
        self.type_index.clear();
        self.incoming_index.clear();
        self.target_type_index.clear();
        self.importance_index.clear();
        self.predicate_index.clear();
        atoms
    }
}

/// The in-memory typed-hypergraph knowledge-base store.
///
/// `AtomTable` is intentionally **not** `Clone` or `Copy` (§7,
/// `NotCopyable`): the original throws from a defined-but-forbidden copy
/// constructor, but Rust simply never derives one unless asked, which is
/// the idiomatic equivalent -- there is no copy to forbid.
pub struct AtomTable {
    inner: ShardedLock<AtomTableInner>,
    logger: Logger,
    statistics: Option<Arc<dyn StatisticsMonitor>>,
}

impl AtomTable {
    /// Creates an empty table with default options and no statistics
    /// collaborator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(AtomTableOptions::default(), None)
    }

    /// Creates an empty table with a statistics collaborator attached.
    #[must_use]
    pub fn with_statistics(monitor: Arc<dyn StatisticsMonitor>) -> Self {
        let mut options = AtomTableOptions::default();
        options.use_statistics = true;
        Self::with_options(options, Some(monitor))
    }

    /// Creates an empty table with explicit options and an optional
    /// statistics collaborator.
    #[must_use]
    pub fn with_options(
        options: AtomTableOptions,
        statistics: Option<Arc<dyn StatisticsMonitor>>,
    ) -> Self {
        let logger = options.logger();
        Self {
            inner: ShardedLock::new(AtomTableInner::new(logger)),
            logger,
            statistics,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_inner<R>(&self, f: impl FnOnce(&AtomTableInner) -> R) -> R {
        f(&self.inner.read().unwrap())
    }

    /// Registers a new type as a child of `parent`. Delivers the
    /// `typeAdded` signal to the type-keyed indices synchronously, under
    /// the same write guard, before any reader can observe the new type.
    pub fn add_type(&self, name: &str, parent: TypeId) -> TypeId {
        let mut guard = self.inner.write().unwrap();
        let t = guard.types.add_type(name, parent);
        guard.type_index.on_type_added(t);
        guard.target_type_index.on_type_added(t);
        t
    }

    /// Looks up a previously registered type by name.
    #[must_use]
    pub fn type_by_name(&self, name: &str) -> Option<TypeId> {
        self.inner.read().unwrap().types.by_name(name)
    }

    /// `true` iff `sub` is `sup` or a transitive child of `sup`.
    #[must_use]
    pub fn is_a(&self, sub: TypeId, sup: TypeId) -> bool {
        self.inner.read().unwrap().types.is_a(sub, sup)
    }

    /// §4.9 `add`.
    pub fn add(&self, candidate: NewAtom) -> Result<Handle> {
        let handle = self.inner.write().unwrap().add(candidate)?;
        self.notify_add(handle);
        Ok(handle)
    }

    /// Persistence rehydration entry point; see [`AtomTableInner::add_with_handle`].
    pub fn add_with_handle(&self, handle: Handle, candidate: NewAtom) -> Result<Handle> {
        let handle = self.inner.write().unwrap().add_with_handle(handle, candidate)?;
        self.notify_add(handle);
        Ok(handle)
    }

    fn notify_add(&self, handle: Handle) {
        if let Some(stats) = &self.statistics {
            if let Some(atom) = self.inner.read().unwrap().arena.resolve(handle) {
                stats.on_add(atom);
            }
        }
    }

    /// §4.9 `extract`. Never fails: an aborted extraction (I4 would be
    /// violated) returns `∅` and logs a warning rather than raising
    /// [`Error::NotRemovable`] (§7's propagation policy).
    pub fn extract(&self, handle: Handle, recursive: bool) -> HashSet<Handle> {
        self.inner
            .write()
            .unwrap()
            .extract(handle, recursive, &self.logger)
    }

    /// Destroys every handle in `extracted`, freeing its arena slot and
    /// notifying the statistics collaborator once per atom.
    pub fn remove_extracted(&self, extracted: &HashSet<Handle>) {
        let removed: Vec<Atom> = {
            let mut guard = self.inner.write().unwrap();
            extracted
                .iter()
                .filter_map(|&h| guard.arena.vacate(h))
                .collect()
        };
        self.notify_remove(&removed);
    }

    /// §4.9 `remove`: `extract` then `removeExtracted`, returning whether
    /// anything was removed.
    pub fn remove(&self, handle: Handle, recursive: bool) -> bool {
        let extracted = self.extract(handle, recursive);
        let removed = !extracted.is_empty();
        self.remove_extracted(&extracted);
        removed
    }

    /// The decay sweep: bulk-removes every atom flagged
    /// [`Atom::is_decayed`], bypassing the incoming-set check entirely --
    /// the external decay policy owns that invariant. Unlike `extract`,
    /// this never aborts; instead it cascades forward through the incoming
    /// relation, also removing every link that (transitively) references a
    /// decayed atom, so no surviving link is left pointing at a vacated
    /// slot (I2). Returns the number of atoms removed.
    pub fn purge_decayed(&self) -> usize {
        let removed = self.inner.write().unwrap().purge_decayed(&self.logger);
        let count = removed.len();
        self.notify_remove(&removed);
        count
    }

    fn notify_remove(&self, removed: &[Atom]) {
        if let Some(stats) = &self.statistics {
            for atom in removed {
                stats.on_remove(atom);
            }
        }
    }

    /// Drops every atom and every index in one pass (§4.12's permitted bulk
    /// short-circuit), still notifying the statistics collaborator once per
    /// atom so external observers see a consistent removal count.
    pub fn clear(&self) {
        let removed = self.inner.write().unwrap().clear();
        self.notify_remove(&removed);
    }

    /// Marks `handle` as decayed or not. Owned entirely by the external
    /// decay policy; the core only reads this flag in [`purge_decayed`](Self::purge_decayed).
    pub fn set_decayed(&self, handle: Handle, decayed: bool) -> Result<()> {
        match self.inner.write().unwrap().arena.resolve_mut(handle) {
            Some(atom) => {
                atom.set_decayed(decayed);
                Ok(())
            }
            None => Err(Error::InvalidHandle(handle)),
        }
    }

    /// Sets `handle`'s importance, keeping the importance index consistent.
    pub fn set_importance(&self, handle: Handle, importance: i64) -> Result<()> {
        let mut guard = self.inner.write().unwrap();
        let Some(old) = guard.arena.resolve(handle).map(Atom::importance) else {
            return Err(Error::InvalidHandle(handle));
        };
        guard.importance_index.remove(old, handle);
        guard.arena.resolve_mut(handle).unwrap().set_importance(importance);
        guard.importance_index.insert(importance, handle);
        Ok(())
    }

    /// `true` iff `handle` resolves to a live atom.
    #[must_use]
    pub fn valid(&self, handle: Handle) -> bool {
        self.inner.read().unwrap().arena.valid(handle)
    }

    /// A clone of the atom at `handle`, if live.
    #[must_use]
    pub fn get(&self, handle: Handle) -> Option<Atom> {
        self.inner.read().unwrap().arena.resolve(handle).cloned()
    }

    /// The set of all link handles referencing `handle` directly.
    #[must_use]
    pub fn incoming(&self, handle: Handle) -> HashSet<Handle> {
        self.inner.read().unwrap().incoming_index.get(handle)
    }

    /// C10: every link using `predicate` in its head (first outgoing)
    /// position.
    #[must_use]
    pub fn get_by_predicate(&self, predicate: Handle) -> HashSet<Handle> {
        self.inner.read().unwrap().predicate_index.get(predicate)
    }

    /// §4.8.1 `getByType`.
    #[must_use]
    pub fn get_by_type(&self, t: TypeId, subclass: bool) -> HashSet<Handle> {
        self.inner.read().unwrap().get_by_type(t, subclass)
    }

    /// Exact `(type, name)` lookup (C4).
    #[must_use]
    pub fn get_by_name_type(&self, t: TypeId, name: &str) -> Option<Handle> {
        self.inner.read().unwrap().node_index.get(t, name)
    }

    /// Exact `(type, outgoing)` lookup (C5).
    #[must_use]
    pub fn get_by_link_type(&self, t: TypeId, outgoing: &[Handle]) -> Option<Handle> {
        self.inner.read().unwrap().link_index.get(t, outgoing)
    }

    /// §4.8.2, the full compound positional query.
    pub fn get_by_outgoing(
        &self,
        slots: &[OutgoingSlot],
        link_type: TypeId,
        subclass: bool,
        version_filter: VersionFilter<'_>,
    ) -> Result<HashSet<Handle>> {
        self.inner
            .read()
            .unwrap()
            .get_by_outgoing(slots, link_type, subclass, version_filter)
    }

    /// §4.8.3, the compound by-name query.
    pub fn get_by_names(
        &self,
        slots: &[NameSlot],
        link_type: TypeId,
        subclass: bool,
    ) -> Result<HashSet<Handle>> {
        self.inner.read().unwrap().get_by_names(slots, link_type, subclass)
    }

    /// §4.11 `forEachByType`: visits every live, non-extracted atom of `t`
    /// (honoring `subclass`) in unspecified order.
    pub fn for_each_by_type(&self, t: TypeId, subclass: bool, mut visitor: impl FnMut(Handle, &Atom)) {
        let guard = self.inner.read().unwrap();
        for handle in guard.get_by_type(t, subclass) {
            if let Some(atom) = guard.arena.resolve(handle) {
                if !atom.is_marked_for_removal() {
                    visitor(handle, atom);
                }
            }
        }
    }

    /// §4.11 `getRandom`: uniform sample over every live atom (not every
    /// type). Returns `None` for an empty table.
    pub fn get_random(&self, rng: &mut dyn Rng) -> Option<Handle> {
        let guard = self.inner.read().unwrap();
        let live: Vec<Handle> = guard
            .arena
            .iter()
            .filter(|(_, atom)| !atom.is_marked_for_removal())
            .map(|(h, _)| h)
            .collect();
        if live.is_empty() {
            return None;
        }
        Some(live[rng.randint(live.len())])
    }

    /// The number of atoms currently occupying the table (including any
    /// already extracted but not yet finalized with
    /// [`remove_extracted`](Self::remove_extracted)).
    #[must_use]
    pub fn size(&self) -> usize {
        self.inner.read().unwrap().arena.len()
    }

    /// `true` iff the table holds no atoms.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.size() == 0
    }

    /// `true` iff a statistics collaborator was supplied at construction.
    #[must_use]
    pub fn uses_statistics(&self) -> bool {
        self.statistics.is_some()
    }
}

impl Default for AtomTable {
    fn default() -> Self {
        Self::new()
    }
}
