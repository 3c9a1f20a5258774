//! The multi-index back end of an `AtomTable` (C4–C10).
//!
//! Each index here answers exactly one of the lookup relations §2 assigns
//! it and nothing else; the query engine (`crate::query`) is the only code
//! that combines them.

pub(crate) mod importance;
pub(crate) mod incoming;
pub(crate) mod link;
pub(crate) mod node;
pub(crate) mod predicate;
pub(crate) mod target_type;
pub(crate) mod type_index;

pub(crate) use importance::ImportanceIndex;
pub(crate) use incoming::IncomingIndex;
pub(crate) use link::LinkIndex;
pub(crate) use node::NodeIndex;
pub(crate) use predicate::PredicateIndex;
pub(crate) use target_type::TargetTypeIndex;
pub(crate) use type_index::TypeIndex;
