//! Concurrent readers and writers sharing one ring.

use std::sync::atomic::{AtomicBool, Ordering};

use hashring_core::{HashRing, NodeId};

const STABLE: [&str; 3] = ["Server1", "Server2", "Server3"];
const FLAPPING: &str = "Server4";

fn assert_send_sync<T: Send + Sync>() {}

fn keys() -> Vec<String> {
    (0..256).map(|i| format!("key-{i}")).collect()
}

fn stable_ring() -> HashRing {
    let ring = HashRing::new(8).unwrap();
    for node in STABLE {
        ring.add_node(node);
    }
    ring
}

#[test]
fn test_ring_is_send_and_sync() {
    assert_send_sync::<HashRing>();
}

#[test]
fn test_readers_see_whole_membership_changes() {
    let keys = keys();

    let without = stable_ring().resolve_many(&keys);
    let with = {
        let ring = stable_ring();
        ring.add_node(FLAPPING);
        ring.resolve_many(&keys)
    };
    assert_ne!(with, without, "flapping node owns none of the keys");

    let ring = stable_ring();
    let done = AtomicBool::new(false);

    crossbeam::scope(|s| {
        s.spawn(|_| {
            for _ in 0..500 {
                ring.add_node(FLAPPING);
                ring.remove_node(FLAPPING);
            }
            done.store(true, Ordering::Release);
        });

        for _ in 0..4 {
            s.spawn(|_| {
                while !done.load(Ordering::Acquire) {
                    let batch = ring.resolve_many(&keys);
                    // A batch is taken under one read lock, so it matches one
                    // of the two memberships exactly.
                    assert!(batch == with || batch == without);
                }
            });
        }

        s.spawn(|_| {
            while !done.load(Ordering::Acquire) {
                let owner = ring.resolve("key-7").expect("ring never empties");
                assert!(owner == FLAPPING || STABLE.contains(&owner.as_str()));
            }
        });
    })
    .unwrap();

    assert_eq!(ring.resolve_many(&keys), without);
    assert_eq!(ring.token_count(), 24);
}

#[test]
fn test_concurrent_adds_of_distinct_nodes() {
    let ring = HashRing::new(16).unwrap();
    let names: Vec<NodeId> = (0..8).map(|i| NodeId::from(format!("shard-{i}"))).collect();

    crossbeam::scope(|s| {
        for name in &names {
            let ring = &ring;
            s.spawn(move |_| ring.add_node(name.clone()));
        }
    })
    .unwrap();

    assert_eq!(ring.nodes(), names);
    assert_eq!(ring.token_count(), 8 * 16);
}
