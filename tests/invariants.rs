//! Property tests checking that the store's structural invariants (I1-I3,
//! I5; P1, P2, P3, P6) survive arbitrary interleavings of add and remove,
//! in the same action-sequence style the teacher uses for its own indices.

use std::collections::{HashMap, HashSet};

use proptest::{collection::vec, num, prop_assert, prop_oneof, proptest, strategy::Strategy};

use atomtable::{AtomKind, AtomTable, Handle, NewAtom, ATOM};

mod common;

use common::{bucket_name, fresh_table, ACTIONS_MAX_LEN};

#[derive(Debug, Clone)]
enum Action {
    // Applied to a small subset of names (modulo 8), so sequences actually
    // revisit shared structure instead of only minting fresh atoms.
    AddNode(u8),
    AddLink(u8, u8),
    Remove(u8, bool),
}

fn generate_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        num::u8::ANY.prop_map(Action::AddNode),
        (num::u8::ANY, num::u8::ANY).prop_map(|(a, b)| Action::AddLink(a, b)),
        (num::u8::ANY, proptest::bool::ANY).prop_map(|(a, r)| Action::Remove(a, r)),
    ]
}

/// Walks every live atom and checks I1 (structural uniqueness), I2 (outgoing
/// validity), I3 (incoming closure, both directions), and P6 (`size` equals
/// the live-atom count).
fn check_invariants(table: &AtomTable) {
    let live = table.get_by_type(ATOM, true);
    assert_eq!(table.size(), live.len(), "P6: size must equal live atoms");

    let mut seen_nodes = HashSet::new();
    let mut seen_links = HashSet::new();

    for &h in &live {
        let atom = table.get(h).expect("handle from get_by_type must resolve");
        match atom.kind() {
            AtomKind::Node { name } => {
                assert!(
                    seen_nodes.insert((atom.atom_type(), name.clone())),
                    "I1: two live nodes share a structural key"
                );
            }
            AtomKind::Link { outgoing } => {
                assert!(
                    seen_links.insert((atom.atom_type(), outgoing.clone())),
                    "I1: two live links share a structural key"
                );
                for &target in outgoing.iter() {
                    assert!(table.valid(target), "I2: outgoing handle does not resolve");
                    assert!(
                        table.incoming(target).contains(&h),
                        "I3: link missing from its target's incoming set"
                    );
                }
            }
        }
        for link in table.incoming(h) {
            assert!(live.contains(&link), "I3: incoming set names a dead link");
            let referencing = table.get(link).unwrap();
            let outgoing = referencing.kind().outgoing().expect("incoming only holds links");
            assert!(
                outgoing.contains(&h),
                "I3: incoming entry does not actually reference the atom"
            );
        }
    }
}

#[test]
fn invariants_hold_after_any_action_sequence() {
    proptest!(|(actions in vec(generate_action(), 1..ACTIONS_MAX_LEN))| {
        let (table, concept, list) = fresh_table();
        let mut nodes: HashMap<u8, Handle> = HashMap::new();

        for action in &actions {
            match *action {
                Action::AddNode(n) => {
                    let h = table.add(NewAtom::node(concept, bucket_name(n))).unwrap();
                    if let Some(&existing) = nodes.get(&n) {
                        prop_assert!(existing == h, "L1/L2: re-adding the same node changed its handle");
                    }
                    nodes.insert(n, h);
                }
                Action::AddLink(a, b) => {
                    if let (Some(&ha), Some(&hb)) = (nodes.get(&a), nodes.get(&b)) {
                        let _ = table.add(NewAtom::link(list, [ha, hb]));
                    }
                }
                Action::Remove(n, recursive) => {
                    if let Some(&h) = nodes.get(&n) {
                        if table.remove(h, recursive) {
                            nodes.remove(&n);
                        }
                    }
                }
            }
            check_invariants(&table);
        }
    });
}

#[test]
fn non_recursive_remove_never_drops_a_referenced_node() {
    // P4: a successful non-recursive remove implies the incoming set was
    // empty beforehand -- equivalently, a node with a live incoming link can
    // never be dropped by a non-recursive remove.
    proptest!(|(actions in vec(generate_action(), 1..ACTIONS_MAX_LEN))| {
        let (table, concept, list) = fresh_table();
        let mut nodes: HashMap<u8, Handle> = HashMap::new();

        for action in &actions {
            match *action {
                Action::AddNode(n) => {
                    let h = table.add(NewAtom::node(concept, bucket_name(n))).unwrap();
                    nodes.insert(n, h);
                }
                Action::AddLink(a, b) => {
                    if let (Some(&ha), Some(&hb)) = (nodes.get(&a), nodes.get(&b)) {
                        let _ = table.add(NewAtom::link(list, [ha, hb]));
                    }
                }
                Action::Remove(n, false) => {
                    if let Some(&h) = nodes.get(&n) {
                        let had_incoming = !table.incoming(h).is_empty();
                        let removed = table.remove(h, false);
                        prop_assert!(!(had_incoming && removed), "P4 violated");
                        if removed {
                            nodes.remove(&n);
                        }
                    }
                }
                Action::Remove(n, true) => {
                    if let Some(&h) = nodes.get(&n) {
                        table.remove(h, true);
                        nodes.remove(&n);
                    }
                }
            }
        }
    });
}
