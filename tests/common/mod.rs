//! Shared helpers for the integration test suite.

use atomtable::{AtomTable, TypeId, LINK, NODE};

/// Max length of a generated action sequence, matching the scale the store's
/// indices are expected to stay coherent at across a single proptest case.
pub const ACTIONS_MAX_LEN: usize = 100;

/// A table pre-seeded with one node type and one link type, the minimum
/// needed to generate a population of links with real structure.
pub fn fresh_table() -> (AtomTable, TypeId, TypeId) {
    let table = AtomTable::new();
    let concept = table.add_type("ConceptNode", NODE);
    let list = table.add_type("ListLink", LINK);
    (table, concept, list)
}

/// Maps a generated `u8` down to a small, frequently-colliding name space so
/// that random sequences actually exercise dedup and removal against shared
/// structure, rather than almost always hitting brand-new atoms.
pub fn bucket_name(n: u8) -> String {
    format!("n{}", n % 8)
}
