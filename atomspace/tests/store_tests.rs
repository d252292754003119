use atomspace::{serialize_store, Atom, AtomSpace, AtomType, Handle};
use std::sync::Arc;
use std::thread;

fn build_sample(space: &AtomSpace) -> Handle {
    let a = space.add_node("ConceptNode", "a").unwrap();
    let b = space.add_node("ConceptNode", "b").unwrap();
    let pred = space.add_node("PredicateNode", "likes").unwrap();
    let args = space.add_link("ListLink", vec![a, b]).unwrap();
    space.add_link("EvaluationLink", vec![pred, args]).unwrap()
}

#[test]
fn concurrent_interning_yields_one_instance() {
    let space = Arc::new(AtomSpace::new());

    let handles: Vec<Handle> = (0..8)
        .map(|_| {
            let space = space.clone();
            thread::spawn(move || {
                let mut last = None;
                for _ in 0..200 {
                    last = Some(build_sample(&space));
                }
                last.unwrap()
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|worker| worker.join().unwrap())
        .collect();

    assert_eq!(space.count(), 5);
    for handle in &handles[1..] {
        assert!(Arc::ptr_eq(handle, &handles[0]));
    }
}

#[test]
fn foreign_children_are_copied_in() {
    let source = AtomSpace::new();
    let target = AtomSpace::new();
    let evaluation = build_sample(&source);

    let copied = target.intern(evaluation.clone());
    assert_eq!(target.count(), 5);
    assert_eq!(*copied, *evaluation);
    assert!(!Arc::ptr_eq(&copied, &evaluation));

    let canonical_a = target.get_node("ConceptNode", "a").unwrap();
    let list = &copied.outgoing()[1];
    assert!(Arc::ptr_eq(&list.outgoing()[0], &canonical_a));
    assert!(Arc::ptr_eq(list, &target.get_atom(list).unwrap()));

    // The source store is untouched
    assert_eq!(source.count(), 5);
    assert_eq!(target.incoming_set(&canonical_a).len(), 1);
}

#[test]
fn detached_atoms_intern_like_constructed_ones() {
    let space = AtomSpace::new();
    let detached = Atom::link(
        AtomType::link("ListLink"),
        vec![Arc::new(
            Atom::node(AtomType::node("ConceptNode"), "a").unwrap(),
        )],
    )
    .unwrap();

    let first = space.add_atom(detached.clone());
    let a = space.add_node("Concept", "a").unwrap();
    let second = space.add_link("List", vec![a]).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(space.count(), 2);
}

#[test]
fn dump_is_independent_of_insertion_order() {
    let forward = AtomSpace::new();
    build_sample(&forward);

    let backward = AtomSpace::new();
    let b = backward.add_node("ConceptNode", "b").unwrap();
    let a = backward.add_node("ConceptNode", "a").unwrap();
    let args = backward.add_link("ListLink", vec![a, b]).unwrap();
    let pred = backward.add_node("PredicateNode", "likes").unwrap();
    backward.add_link("EvaluationLink", vec![pred, args]).unwrap();

    assert_eq!(serialize_store(&forward), serialize_store(&backward));
    assert_eq!(
        serialize_store(&forward),
        concat!(
            "(ConceptNode \"a\")\n",
            "(ConceptNode \"b\")\n",
            "(PredicateNode \"likes\")\n",
            "(EvaluationLink (PredicateNode \"likes\") (ListLink (ConceptNode \"a\") (ConceptNode \"b\")))\n",
            "(ListLink (ConceptNode \"a\") (ConceptNode \"b\"))\n",
        )
    );
}

#[test]
fn extraction_respects_incoming_sets() {
    let space = AtomSpace::new();
    let evaluation = build_sample(&space);
    let a = space.get_node("ConceptNode", "a").unwrap();

    assert!(!space.extract(&a, false));
    assert!(space.contains(&evaluation));

    assert!(space.extract(&evaluation, false));
    assert_eq!(space.count(), 4);

    assert!(space.extract(&a, true));
    assert_eq!(space.count(), 2);
    assert!(space.get_node("ConceptNode", "b").is_some());
    assert!(space.get_node("PredicateNode", "likes").is_some());
}

#[test]
fn unordered_links_dedupe_across_orderings() {
    let space = AtomSpace::new();
    let a = space.add_node("ConceptNode", "a").unwrap();
    let b = space.add_node("ConceptNode", "b").unwrap();
    let ab = space.add_link("SetLink", vec![a.clone(), b.clone()]).unwrap();
    let ba = space.add_link("SetLink", vec![b, a]).unwrap();
    assert!(Arc::ptr_eq(&ab, &ba));
    assert_eq!(space.count(), 3);
}
