//! Property tests for ring placement.

use std::collections::BTreeSet;

use hashring_core::{HashRing, NodeId};
use proptest::prelude::*;

fn node_names() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("[a-z]{1,8}", 1..8)
}

fn keys() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[ -~]{0,16}", 1..64)
}

fn ring_of(replicas: usize, nodes: &BTreeSet<String>) -> HashRing {
    let ring = HashRing::new(replicas).unwrap();
    for node in nodes {
        ring.add_node(node);
    }
    ring
}

proptest! {
    /// Property: a non-empty ring resolves every key to one of its members,
    /// and always to the same one.
    #[test]
    fn prop_resolve_is_deterministic_member(
        replicas in 1usize..8,
        nodes in node_names(),
        keys in keys()
    ) {
        let ring = ring_of(replicas, &nodes);
        for key in &keys {
            let owner = ring.resolve(key);
            prop_assert!(owner.is_some());
            prop_assert!(nodes.contains(owner.as_ref().unwrap().as_str()));
            prop_assert_eq!(owner, ring.resolve(key));
        }
    }

    /// Property: removing a node only moves the keys it owned.
    #[test]
    fn prop_removal_moves_only_victim_keys(
        replicas in 1usize..8,
        nodes in node_names(),
        keys in keys(),
        pick in any::<prop::sample::Index>()
    ) {
        let ring = ring_of(replicas, &nodes);
        let victim = pick.get(&nodes.iter().collect::<Vec<_>>()).to_string();

        let before = ring.resolve_many(&keys);
        ring.remove_node(victim.as_str());
        let after = ring.resolve_many(&keys);

        for (old, new) in before.iter().zip(&after) {
            let old = old.as_ref().unwrap();
            if old.as_str() == victim {
                // The last node leaving empties the ring.
                prop_assert!(new.as_ref().map_or(nodes.len() == 1, |n| n.as_str() != victim));
            } else {
                prop_assert_eq!(Some(old), new.as_ref());
            }
        }
    }

    /// Property: adding a node twice is the same as adding it once.
    #[test]
    fn prop_add_is_idempotent(
        replicas in 1usize..8,
        nodes in node_names()
    ) {
        let ring = ring_of(replicas, &nodes);
        let before = ring.snapshot();
        let again = nodes.iter().next_back().unwrap();

        ring.add_node(again);
        prop_assert_eq!(ring.snapshot(), before);
    }

    /// Property: adding then removing a new node restores the ring.
    #[test]
    fn prop_add_remove_round_trip(
        replicas in 1usize..8,
        nodes in node_names(),
        keys in keys()
    ) {
        let ring = ring_of(replicas, &nodes);
        let before = ring.snapshot();
        let owners = ring.resolve_many(&keys);

        // Upper case never clashes with the generated lower-case names.
        ring.add_node("FRESH");
        prop_assert!(ring.contains_node("FRESH"));
        ring.remove_node("FRESH");

        prop_assert_eq!(ring.snapshot(), before);
        prop_assert_eq!(ring.resolve_many(&keys), owners);
    }

    /// Property: a ring with all nodes removed has no owner for any key.
    #[test]
    fn prop_emptied_ring_has_no_owner(
        replicas in 1usize..8,
        nodes in node_names(),
        keys in keys()
    ) {
        let ring = ring_of(replicas, &nodes);
        for node in &nodes {
            ring.remove_node(node.as_str());
        }
        prop_assert!(ring.is_empty());
        prop_assert!(ring.resolve_many(&keys).iter().all(Option::is_none));
    }

    /// Property: each member holds exactly `replicas` positions.
    #[test]
    fn prop_each_node_contributes_replicas(
        replicas in 1usize..8,
        nodes in node_names()
    ) {
        let ring = ring_of(replicas, &nodes);
        prop_assert_eq!(ring.token_count(), replicas * nodes.len());
        for node in &nodes {
            let id = NodeId::from(node);
            let held = ring.tokens().iter().filter(|(_, owner)| *owner == id).count();
            prop_assert_eq!(held, replicas);
        }
    }
}
