//! The atom model (C3): a tagged Node/Link variant plus mutable belief state.

use smallvec::SmallVec;
use std::fmt;

use crate::handle::Handle;
use crate::truth::{SimpleTruthValue, TruthValue as _};
use crate::types::TypeId;

/// Inline capacity for a link's outgoing tuple before it spills to the heap.
///
/// Most links in a typed hypergraph are binary or ternary (evaluation,
/// inheritance, list); `SmallVec` avoids an allocation for the common case
/// while still supporting arbitrary arity.
pub type Outgoing = SmallVec<[Handle; 4]>;

/// An atom's full structural identity: its type plus either its name
/// (`Node`) or its outgoing tuple (`Link`).
///
/// The original `AtomTable.cc` derives this identity by dispatching on
/// `dynamic_cast<Node*>`/`dynamic_cast<Link*>` inside `getHandle(const
/// Atom*)`, deciding *which* index (node or link) to probe as a side
/// effect of the cast. Giving that decision a named, first-class value
/// makes the same decision explicit and exhaustively matchable instead of
/// implicit in a cast's success or failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StructuralKey {
    /// A node's `(type, name)` identity.
    Node(TypeId, String),
    /// A link's `(type, outgoing tuple)` identity.
    Link(TypeId, Outgoing),
}

/// The structural content that distinguishes one atom from another.
///
/// This is the tagged-variant replacement for the original's
/// `dynamic_cast<Node*>`/`dynamic_cast<Link*>` dispatch (§9): every query
/// that used to cast instead matches on this enum, which the compiler can
/// check for exhaustiveness.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AtomKind {
    /// A named leaf. The `(type, name)` pair is the node's structural key.
    Node {
        /// The node's name. Distinguishes it from every other node of the
        /// same type.
        name: String,
    },
    /// An ordered tuple of references. The `(type, outgoing)` pair is the
    /// link's structural key; order is significant and duplicate handles
    /// within the tuple are permitted.
    Link {
        /// The link's outgoing tuple. Length is the link's arity.
        outgoing: Outgoing,
    },
}

impl AtomKind {
    /// `true` for `Node`.
    #[must_use]
    pub fn is_node(&self) -> bool {
        matches!(self, Self::Node { .. })
    }

    /// `true` for `Link`.
    #[must_use]
    pub fn is_link(&self) -> bool {
        matches!(self, Self::Link { .. })
    }

    /// The node name, if this is a node.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Node { name } => Some(name.as_str()),
            Self::Link { .. } => None,
        }
    }

    /// The outgoing tuple, if this is a link.
    #[must_use]
    pub fn outgoing(&self) -> Option<&[Handle]> {
        match self {
            Self::Link { outgoing } => Some(outgoing.as_slice()),
            Self::Node { .. } => None,
        }
    }

    /// The arity: the outgoing tuple's length for a link, `0` for a node.
    ///
    /// A node's arity is conventionally `0`, not "undefined" -- this lets
    /// the §4.8.2 zero-arity path treat a bare node as a valid (if
    /// uninteresting) zero-arity match when no link-type constraint rules
    /// it out.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Node { .. } => 0,
            Self::Link { outgoing } => outgoing.len(),
        }
    }

    /// The full structural key this kind would have under `atom_type`: the
    /// value the node/link index actually dedups on, given a first-class
    /// name rather than left implicit in which index got probed.
    #[must_use]
    pub fn structural_key(&self, atom_type: TypeId) -> StructuralKey {
        match self {
            Self::Node { name } => StructuralKey::Node(atom_type, name.clone()),
            Self::Link { outgoing } => StructuralKey::Link(atom_type, outgoing.clone()),
        }
    }
}

/// A member of the store: either a [`Node`](AtomKind::Node) or a
/// [`Link`](AtomKind::Link), plus the mutable belief state every atom
/// carries regardless of kind.
#[derive(Debug, Clone)]
pub struct Atom {
    atom_type: TypeId,
    kind: AtomKind,
    truth_value: SimpleTruthValue,
    importance: i64,
    removal_mark: bool,
    decay: bool,
}

impl Atom {
    pub(crate) fn new(atom_type: TypeId, kind: AtomKind, truth_value: SimpleTruthValue) -> Self {
        Self {
            atom_type,
            kind,
            truth_value,
            importance: 0,
            removal_mark: false,
            decay: false,
        }
    }

    /// The atom's exact type.
    #[must_use]
    pub fn atom_type(&self) -> TypeId {
        self.atom_type
    }

    /// The atom's structural content.
    #[must_use]
    pub fn kind(&self) -> &AtomKind {
        &self.kind
    }

    /// The atom's full structural identity (I1): `(type, name)` for a node,
    /// `(type, outgoing)` for a link.
    #[must_use]
    pub fn structural_key(&self) -> StructuralKey {
        self.kind.structural_key(self.atom_type)
    }

    /// The atom's current truth value.
    #[must_use]
    pub fn truth_value(&self) -> &SimpleTruthValue {
        &self.truth_value
    }

    pub(crate) fn set_truth_value(&mut self, tv: SimpleTruthValue) {
        self.truth_value = tv;
    }

    /// The atom's current importance (attention) value.
    #[must_use]
    pub fn importance(&self) -> i64 {
        self.importance
    }

    /// Sets the atom's importance. Exposed for the importance index and for
    /// external attention-allocation policy; the core places no constraint
    /// on the value beyond total ordering.
    pub fn set_importance(&mut self, importance: i64) {
        self.importance = importance;
    }

    /// `true` once [`AtomTable::extract`](crate::table::AtomTable::extract)
    /// has marked this atom for removal.
    #[must_use]
    pub fn is_marked_for_removal(&self) -> bool {
        self.removal_mark
    }

    pub(crate) fn mark_for_removal(&mut self) {
        self.removal_mark = true;
    }

    pub(crate) fn unset_removal_mark(&mut self) {
        self.removal_mark = false;
    }

    /// `true` once an external decay policy has flagged this atom.
    #[must_use]
    pub fn is_decayed(&self) -> bool {
        self.decay
    }

    /// Sets or clears the decay flag. Owned entirely by the external decay
    /// policy collaborator; the core only reads it in `purge_decayed`.
    pub fn set_decayed(&mut self, decayed: bool) {
        self.decay = decayed;
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            AtomKind::Node { name } => write!(f, "({} \"{}\")", self.atom_type, name),
            AtomKind::Link { outgoing } => {
                write!(f, "({}", self.atom_type)?;
                for h in outgoing {
                    write!(f, " {h}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A candidate atom not yet inserted into a table.
///
/// This is the input to [`AtomTable::add`](crate::table::AtomTable::add):
/// unlike a live [`Atom`], it carries no handle and has no notion of
/// belonging to a table (the `lifecycle` distinction in §3 between
/// "candidate" and "live").
#[derive(Debug, Clone)]
pub struct NewAtom {
    pub(crate) atom_type: TypeId,
    pub(crate) kind: AtomKind,
    pub(crate) truth_value: SimpleTruthValue,
}

impl NewAtom {
    /// Builds a candidate node.
    #[must_use]
    pub fn node(atom_type: TypeId, name: impl Into<String>) -> Self {
        Self {
            atom_type,
            kind: AtomKind::Node { name: name.into() },
            truth_value: SimpleTruthValue::null(),
        }
    }

    /// Builds a candidate link.
    #[must_use]
    pub fn link(atom_type: TypeId, outgoing: impl Into<Outgoing>) -> Self {
        Self {
            atom_type,
            kind: AtomKind::Link {
                outgoing: outgoing.into(),
            },
            truth_value: SimpleTruthValue::null(),
        }
    }

    /// Attaches a truth value to the candidate, consuming and returning it.
    #[must_use]
    pub fn with_truth_value(mut self, tv: SimpleTruthValue) -> Self {
        self.truth_value = tv;
        self
    }
}
