//! Hash ring data structure.
//!
//! The ring is a `BTreeMap<Token, NodeId>`: its key set is the ascending
//! sequence of registered positions and its values are their owners, so the
//! ordered index and the position-to-owner mapping can never disagree.
//!
//! All state sits behind one `parking_lot::RwLock`. Lookups share the read
//! lock; adding or removing a node takes the write lock for the whole batch
//! of R updates, so readers never observe a half-applied change.

use std::collections::BTreeMap;
use std::fmt;

use parking_lot::RwLock;
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::node::NodeId;
use crate::partitioner::{Crc32Partitioner, Partitioner};
use crate::ring::snapshot::RingSnapshot;
use crate::token::{Token, RING_SIZE};
use crate::vnode::{vnodes_for, VirtualNode};

/// Replica count used by [`RingBuilder`](crate::ring::RingBuilder) when none
/// is configured.
pub const DEFAULT_REPLICAS: usize = 3;

#[derive(Debug, Default)]
struct RingState {
    /// Virtual node positions: ring position -> physical node.
    vnodes: BTreeMap<Token, NodeId>,
}

impl RingState {
    /// Owner of the first position at or after `token`, wrapping to the
    /// lowest position when `token` is past the last one.
    fn successor(&self, token: Token) -> Option<&NodeId> {
        self.vnodes
            .range(token..)
            .next()
            .or_else(|| self.vnodes.iter().next())
            .map(|(_, owner)| owner)
    }
}

/// Consistent hash ring mapping keys to physical nodes.
///
/// Each physical node is placed on the ring `replicas` times. A key belongs
/// to the owner of the first virtual node clockwise from the key's token.
///
/// The ring is `Send + Sync`; share it by reference or behind an `Arc`.
///
/// # Example
///
/// ```rust
/// use hashring_core::HashRing;
///
/// let ring = HashRing::new(3).unwrap();
/// assert_eq!(ring.resolve("user:42"), None);
///
/// ring.add_node("cache-a");
/// ring.add_node("cache-b");
/// let owner = ring.resolve("user:42").unwrap();
/// assert!(owner == "cache-a" || owner == "cache-b");
/// ```
pub struct HashRing<P = Crc32Partitioner> {
    state: RwLock<RingState>,
    partitioner: P,
    replicas: usize,
}

impl HashRing {
    /// Create an empty ring with the default CRC32 partitioner.
    ///
    /// Fails with [`Error::InvalidReplicaCount`] when `replicas` is zero,
    /// since such a ring could never hold a virtual node.
    pub fn new(replicas: usize) -> Result<Self> {
        Self::with_partitioner(replicas, Crc32Partitioner)
    }
}

impl<P: Partitioner> HashRing<P> {
    /// Create an empty ring placing keys with `partitioner`.
    pub fn with_partitioner(replicas: usize, partitioner: P) -> Result<Self> {
        if replicas == 0 {
            return Err(Error::InvalidReplicaCount(replicas));
        }
        Ok(Self {
            state: RwLock::new(RingState::default()),
            partitioner,
            replicas,
        })
    }

    /// Place the `replicas` virtual nodes of `node_id` on the ring.
    ///
    /// Adding a node that is already present re-inserts the same positions,
    /// so the call is idempotent. If one of the positions is already owned by
    /// another node, the new owner takes it over (last write wins).
    pub fn add_node(&self, node_id: impl Into<NodeId>) {
        let node_id = node_id.into();
        let vnodes: Vec<VirtualNode> =
            vnodes_for(&self.partitioner, &node_id, self.replicas).collect();

        let mut state = self.state.write();
        for vnode in vnodes {
            let token = vnode.token;
            if let Some(previous) = state.vnodes.insert(token, vnode.node_id) {
                if previous != node_id {
                    warn!(%token, %previous, owner = %node_id, "virtual node collision, position reassigned");
                }
            }
        }
        debug!(%node_id, replicas = self.replicas, tokens = state.vnodes.len(), "added node to ring");
    }

    /// Take the virtual nodes of `node_id` off the ring.
    ///
    /// Positions are recomputed exactly as in [`add_node`](Self::add_node) and
    /// removed only while `node_id` still owns them: a position taken over by
    /// another node through a collision stays with that node. Removing an
    /// unknown node is a no-op.
    ///
    /// Returns `true` if at least one position was removed.
    pub fn remove_node(&self, node_id: impl Into<NodeId>) -> bool {
        use std::collections::btree_map::Entry;

        let node_id = node_id.into();
        let vnodes: Vec<VirtualNode> =
            vnodes_for(&self.partitioner, &node_id, self.replicas).collect();

        let mut state = self.state.write();
        let mut removed = 0usize;
        for vnode in vnodes {
            if let Entry::Occupied(entry) = state.vnodes.entry(vnode.token) {
                if *entry.get() == node_id {
                    entry.remove();
                    removed += 1;
                } else {
                    debug!(token = %vnode.token, owner = %entry.get(), %node_id, "position owned by another node, kept");
                }
            }
        }
        debug!(%node_id, removed, tokens = state.vnodes.len(), "removed node from ring");
        removed > 0
    }

    /// Find the node responsible for `key`.
    ///
    /// Returns `None` when the ring holds no virtual nodes.
    pub fn resolve(&self, key: impl AsRef<[u8]>) -> Option<NodeId> {
        let token = self.partitioner.partition(key.as_ref());
        let owner = self.resolve_token(token);
        trace!(%token, owner = ?owner, "resolved key");
        owner
    }

    /// Find the node responsible for an already computed position.
    pub fn resolve_token(&self, token: Token) -> Option<NodeId> {
        self.state.read().successor(token).cloned()
    }

    /// Resolve a batch of keys against a single state of the ring.
    ///
    /// Keys are hashed before the read lock is taken; concurrent writers
    /// cannot interleave with the lookups, so the result never mixes two
    /// memberships.
    pub fn resolve_many<I, K>(&self, keys: I) -> Vec<Option<NodeId>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<[u8]>,
    {
        let tokens: Vec<Token> = keys
            .into_iter()
            .map(|key| self.partitioner.partition(key.as_ref()))
            .collect();

        let state = self.state.read();
        tokens
            .into_iter()
            .map(|token| state.successor(token).cloned())
            .collect()
    }

    /// Number of virtual nodes per physical node.
    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Name of the hash function placing keys and virtual nodes.
    pub fn partitioner_name(&self) -> &'static str {
        self.partitioner.name()
    }

    /// Number of registered positions (virtual nodes).
    pub fn token_count(&self) -> usize {
        self.state.read().vnodes.len()
    }

    /// Number of distinct physical nodes owning at least one position.
    pub fn node_count(&self) -> usize {
        self.nodes().len()
    }

    /// Whether the ring holds no virtual nodes, so every lookup yields `None`.
    pub fn is_empty(&self) -> bool {
        self.state.read().vnodes.is_empty()
    }

    /// Whether `node_id` owns at least one position.
    pub fn contains_node(&self, node_id: &str) -> bool {
        self.state.read().vnodes.values().any(|owner| owner == node_id)
    }

    /// Distinct owners, sorted by id.
    pub fn nodes(&self) -> Vec<NodeId> {
        let state = self.state.read();
        let mut nodes: Vec<NodeId> = state.vnodes.values().cloned().collect();
        nodes.sort();
        nodes.dedup();
        nodes
    }

    /// All `(position, owner)` pairs in ring order.
    pub fn tokens(&self) -> Vec<(Token, NodeId)> {
        self.state
            .read()
            .vnodes
            .iter()
            .map(|(token, owner)| (*token, owner.clone()))
            .collect()
    }

    /// Share of the hash space owned by each node, in `(0, 1]`.
    ///
    /// A virtual node owns the arc from its predecessor (exclusive) up to its
    /// own position (inclusive). The shares of all nodes sum to one; an empty
    /// ring yields an empty map.
    pub fn ownership(&self) -> BTreeMap<NodeId, f64> {
        let state = self.state.read();
        let mut prev = match state.vnodes.keys().next_back() {
            Some(last) => *last,
            None => return BTreeMap::new(),
        };

        let mut owned: BTreeMap<NodeId, u64> = BTreeMap::new();
        for (token, owner) in &state.vnodes {
            // Only a lone position is its own predecessor.
            let arc = match prev.distance_to(*token) {
                0 => RING_SIZE,
                d => u64::from(d),
            };
            *owned.entry(owner.clone()).or_default() += arc;
            prev = *token;
        }

        owned
            .into_iter()
            .map(|(node, arc)| (node, arc as f64 / RING_SIZE as f64))
            .collect()
    }

    /// Point-in-time copy of the ring for display and diagnostics.
    pub fn snapshot(&self) -> RingSnapshot {
        let state = self.state.read();
        RingSnapshot {
            partitioner: self.partitioner.name(),
            replicas: self.replicas,
            vnodes: state
                .vnodes
                .iter()
                .map(|(token, owner)| VirtualNode::new(*token, owner.clone()))
                .collect(),
        }
    }
}

impl<P: Partitioner> fmt::Debug for HashRing<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashRing")
            .field("partitioner", &self.partitioner.name())
            .field("replicas", &self.replicas)
            .field("tokens", &self.token_count())
            .finish()
    }
}
