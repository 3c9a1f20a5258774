//! An in-memory, typed hypergraph knowledge-base store.
//!
//! # AtomTable
//!
//! An [`AtomTable`] holds **atoms**: typed, deduplicated nodes and links
//! forming a directed hypergraph. A [`Node`](atom::AtomKind::Node) is a
//! named leaf; a [`Link`](atom::AtomKind::Link) is an ordered tuple of
//! references to other atoms (its *outgoing set*). Both kinds carry a
//! [`TruthValue`](truth::TruthValue) belief and an importance score.
//!
//! Every atom is addressed by an opaque [`Handle`], an arena index owned by
//! the table that issued it -- a handle from one table never resolves
//! against another. Insertion is idempotent: adding a node or link that is
//! structurally identical (same type and name, or same type and outgoing
//! tuple) to one already present merges truth values and returns the
//! existing handle rather than creating a duplicate.
//!
//! # Types
//!
//! Types form a single-rooted, dynamically extensible lattice under
//! [`ATOM`](types::ATOM), registered at run time with
//! [`AtomTable::add_type`]. [`NODE`](types::NODE) and [`LINK`](types::LINK)
//! are the two predefined immediate children of `ATOM`; every concrete atom
//! type is a descendant of one or the other.
//!
//! # Queries
//!
//! Beyond the exact `(type, name)` and `(type, outgoing)` lookups
//! ([`AtomTable::get_by_name_type`], [`AtomTable::get_by_link_type`]), the
//! table supports two compound query shapes built by intersecting per-slot
//! candidate sets drawn from its indices: a positional query constraining
//! each outgoing slot by handle or by type
//! ([`AtomTable::get_by_outgoing`]), and an equivalent query constraining
//! slots by name ([`AtomTable::get_by_names`]). See `query` for the full
//! algorithm, including its fast paths and short-circuit rules.
//!
//! # Removal
//!
//! [`AtomTable::extract`] computes the transitive closure of atoms that
//! would need to be removed to drop a given handle (recursively pulling in
//! everything that still references it, if asked), validates that nothing
//! outside that closure points into it, and only then commits the removal
//! atomically across every index. [`AtomTable::remove`] is the
//! extract-then-finalize convenience wrapper; [`AtomTable::purge_decayed`]
//! is a separate bulk sweep for an external decay policy that
//! intentionally does not perform this check -- it cascades forward
//! through the incoming relation instead, removing every link that still
//! references a decayed atom rather than aborting.
//!
//! # Concurrency
//!
//! A table supports a single writer and many concurrent readers
//! (`crossbeam::sync::ShardedLock`). Mutating operations (`add`, `extract`,
//! `remove`, `remove_extracted`, `purge_decayed`, `add_type`) take the
//! write guard; every query takes the read guard.
//!
//! # What this crate does not do
//!
//! Persistence, distribution, cross-process transactionality, query
//! languages, inference rules, and attention-value decay *policy* are all
//! out of scope -- the table exposes narrow collaborator traits
//! ([`TruthValue`](truth::TruthValue), [`Rng`](rng::Rng),
//! [`StatisticsMonitor`](stats::StatisticsMonitor)) and a stable handle
//! encoding (`codec`) for calling code to build those concerns on top.

#![warn(
    missing_debug_implementations,
    unsafe_code,
    bare_trait_objects,
    missing_docs
)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    // Next `cast_*` lints don't give alternatives.
    clippy::cast_possible_wrap, clippy::cast_possible_truncation, clippy::cast_sign_loss,
    // Next lints produce too much noise/false positives.
    clippy::module_name_repetitions, clippy::similar_names, clippy::must_use_candidate, clippy::upper_case_acronyms,
    // '... may panic' lints.
    clippy::indexing_slicing,
    // Too much work to fix.
    clippy::missing_errors_doc, clippy::missing_const_for_fn, clippy::missing_panics_doc,
    // Seems should be fixed in `thiserror` crate.
    clippy::reversed_empty_ranges,
)]

pub mod atom;
pub mod codec;
mod error;
mod handle;
mod indexes;
mod logger;
mod options;
pub mod query;
mod rng;
mod stats;
mod table;
pub mod truth;
pub mod types;

pub use self::{
    atom::{Atom, AtomKind, NewAtom, Outgoing, StructuralKey},
    error::{Error, Result},
    handle::Handle,
    logger::Logger,
    options::AtomTableOptions,
    query::{NameSlot, OutgoingSlot, VersionFilter},
    rng::{RandRng, Rng},
    stats::StatisticsMonitor,
    table::AtomTable,
    truth::{SimpleTruthValue, TruthValue},
    types::{TypeId, TypeRegistry, ATOM, LINK, NODE},
};
