//! Integration-level replays of the worked scenarios, exercised through the
//! public `AtomTable` API only (no crate-internal `with_inner` access).

use atomtable::{NewAtom, OutgoingSlot};
use pretty_assertions::assert_eq;

mod common;

use common::fresh_table;

#[test]
fn s1_redundant_node_add_is_idempotent() {
    let (table, concept, _list) = fresh_table();
    let h1 = table.add(NewAtom::node(concept, "cat")).unwrap();
    let h2 = table.add(NewAtom::node(concept, "cat")).unwrap();
    assert_eq!(h1, h2);
    assert_eq!(table.size(), 1);
}

#[test]
fn s2_link_add_is_visible_through_every_relevant_index() {
    let (table, concept, list) = fresh_table();
    let h1 = table.add(NewAtom::node(concept, "a")).unwrap();
    let h2 = table.add(NewAtom::node(concept, "b")).unwrap();
    let h3 = table.add(NewAtom::link(list, [h1, h2])).unwrap();

    assert_eq!(table.incoming(h1), [h3].into_iter().collect());
    assert_eq!(table.get_by_link_type(list, &[h1, h2]), Some(h3));

    let slots = [OutgoingSlot::Handle(h1), OutgoingSlot::Any];
    let result = table.get_by_outgoing(&slots, list, false, None).unwrap();
    assert_eq!(result, [h3].into_iter().collect());
}

#[test]
fn s3_remove_requires_recursion_once_referenced() {
    let (table, concept, list) = fresh_table();
    let h1 = table.add(NewAtom::node(concept, "a")).unwrap();
    let h2 = table.add(NewAtom::node(concept, "b")).unwrap();
    let _h3 = table.add(NewAtom::link(list, [h1, h2])).unwrap();

    assert!(!table.remove(h1, false));
    assert_eq!(table.size(), 3);

    // `extract`'s recursive case walks the *incoming* relation only (spec
    // §4.9): it pulls in every link that references `h1`, never the other
    // atoms such a link happens to reference. `h2` is not in `h1`'s
    // incoming closure, so it survives; only `h1` and the link get removed.
    assert!(table.remove(h1, true));
    assert_eq!(table.size(), 1);
}

#[test]
fn s4_compound_query_narrows_by_exact_handle_and_type() {
    let table = atomtable::AtomTable::new();
    let concept = table.add_type("ConceptNode", atomtable::NODE);
    let predicate = table.add_type("PredicateNode", atomtable::NODE);
    let eval = table.add_type("EvaluationLink", atomtable::LINK);

    let p_a = table.add(NewAtom::node(predicate, "pA")).unwrap();
    let p_b = table.add(NewAtom::node(predicate, "pB")).unwrap();
    let x = table.add(NewAtom::node(concept, "x")).unwrap();
    let y = table.add(NewAtom::node(concept, "y")).unwrap();
    let l1 = table.add(NewAtom::link(eval, [p_a, x])).unwrap();
    let l2 = table.add(NewAtom::link(eval, [p_a, y])).unwrap();
    let _l3 = table.add(NewAtom::link(eval, [p_b, x])).unwrap();

    let slots = [
        OutgoingSlot::Handle(p_a),
        OutgoingSlot::Type {
            type_id: concept,
            subclass: false,
        },
    ];
    let result = table.get_by_outgoing(&slots, eval, false, None).unwrap();
    assert_eq!(result, [l1, l2].into_iter().collect());
}

#[test]
fn s5_zero_arity_link_is_found_by_type_alone() {
    let table = atomtable::AtomTable::new();
    let set_type = table.add_type("SetLink", atomtable::LINK);
    let h = table.add(NewAtom::link(set_type, [])).unwrap();

    let result = table.get_by_outgoing(&[], set_type, false, None).unwrap();
    assert_eq!(result, [h].into_iter().collect());
}

#[test]
fn s6_decay_sweep_invalidates_referencing_links_and_frees_indices() {
    let (table, concept, list) = fresh_table();
    let h1 = table.add(NewAtom::node(concept, "a")).unwrap();
    let h2 = table.add(NewAtom::node(concept, "b")).unwrap();
    let h3 = table.add(NewAtom::link(list, [h1, h2])).unwrap();

    table.set_decayed(h2, true).unwrap();
    let removed = table.purge_decayed();

    // The sweep cascades through the incoming relation: decaying `h2` also
    // takes out `h3`, since leaving it live would leave a link index entry
    // and an outgoing handle pointing at a vacated slot (I2/I5).
    assert_eq!(removed, 2);
    assert!(!table.valid(h2));
    assert!(!table.valid(h3), "a link referencing a decayed atom must not survive the sweep");
    assert!(table.get_by_link_type(list, &[h1, h2]).is_none());
    assert!(table.incoming(h1).is_empty());
}

#[test]
fn decay_sweep_is_idempotent_on_a_table_with_no_decayed_atoms() {
    let (table, concept, _list) = fresh_table();
    table.add(NewAtom::node(concept, "a")).unwrap();
    assert_eq!(table.purge_decayed(), 0);
    assert_eq!(table.size(), 1);
}
