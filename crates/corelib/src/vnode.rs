//! Virtual node abstractions.
//!
//! # Virtual Nodes (VNodes) Concept
//!
//! Instead of each physical node having a single token on the ring, each node
//! owns R tokens (virtual nodes). This provides:
//!
//! 1. **Better Load Distribution**: more tokens = smoother distribution of keys
//! 2. **Gradual Rebalancing**: when nodes join/leave, only ~1/N of keys move
//!
//! # Key Derivation
//!
//! The token of replica `i` of node `n` is the partitioner applied to
//! `"n:i"`. The index is decimal and never contains `:`, so the key can be
//! split unambiguously at its last `:` and no two `(node, index)` pairs share
//! a key. Adding and removing a node both go through [`vnode_key`], which is
//! what lets removal find exactly the positions that adding created.

use crate::node::NodeId;
use crate::partitioner::Partitioner;
use crate::token::Token;
use serde::Serialize;

/// A virtual node on the hash ring.
///
/// Represents a single token position owned by a physical node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct VirtualNode {
    /// Token position on the ring.
    pub token: Token,

    /// The physical node that owns this virtual node.
    ///
    /// Multiple virtual nodes share the same `node_id`; a lookup finds the
    /// vnode's token, then routes to this node.
    pub node_id: NodeId,
}

impl VirtualNode {
    #[inline]
    pub fn new(token: Token, node_id: NodeId) -> Self {
        Self { token, node_id }
    }

    /// Create replica `replica_index` of `node_id`, placed by `partitioner`.
    pub fn from_index<P: Partitioner + ?Sized>(
        partitioner: &P,
        node_id: &NodeId,
        replica_index: usize,
    ) -> Self {
        let token = partitioner.partition(vnode_key(node_id, replica_index).as_bytes());
        Self::new(token, node_id.clone())
    }

    #[inline]
    pub fn token(&self) -> Token {
        self.token
    }

    #[inline]
    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// Clockwise distance to another virtual node.
    #[inline]
    pub fn distance_to(&self, other: &Self) -> u32 {
        self.token.distance_to(other.token)
    }
}

impl std::fmt::Display for VirtualNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VNode(token={}, node={})", self.token, self.node_id)
    }
}

/// Key hashed to place replica `replica_index` of `node_id`.
pub fn vnode_key(node_id: &NodeId, replica_index: usize) -> String {
    format!("{}:{}", node_id, replica_index)
}

/// The R virtual nodes of `node_id`, in replica order.
pub fn vnodes_for<'a, P: Partitioner + ?Sized>(
    partitioner: &'a P,
    node_id: &'a NodeId,
    replicas: usize,
) -> impl Iterator<Item = VirtualNode> + 'a {
    (0..replicas).map(move |i| VirtualNode::from_index(partitioner, node_id, i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partitioner::Crc32Partitioner;

    #[test]
    fn test_vnode_creation() {
        let vnode = VirtualNode::new(Token(100), NodeId::from("node1"));
        assert_eq!(vnode.token(), Token(100));
        assert_eq!(vnode.node_id(), &NodeId::from("node1"));
    }

    #[test]
    fn test_vnode_key_format() {
        assert_eq!(vnode_key(&NodeId::from("Server1"), 0), "Server1:0");
        // Bare concatenation would make these two collide ("Server111").
        assert_ne!(
            vnode_key(&NodeId::from("Server1"), 11),
            vnode_key(&NodeId::from("Server11"), 1)
        );
    }

    #[test]
    fn test_vnode_from_index() {
        let node = NodeId::from("node1");
        let vnode0 = VirtualNode::from_index(&Crc32Partitioner, &node, 0);
        let vnode1 = VirtualNode::from_index(&Crc32Partitioner, &node, 1);

        assert_ne!(vnode0.token(), vnode1.token());
        assert_eq!(vnode0.node_id(), vnode1.node_id());
        assert_eq!(vnode0.token(), Crc32Partitioner.partition(b"node1:0"));
    }

    #[test]
    fn test_vnodes_for_is_deterministic() {
        let node = NodeId::from("cache-a");
        let first: Vec<_> = vnodes_for(&Crc32Partitioner, &node, 5).collect();
        let second: Vec<_> = vnodes_for(&Crc32Partitioner, &node, 5).collect();
        assert_eq!(first.len(), 5);
        assert_eq!(first, second);
    }

    #[test]
    fn test_vnode_distance_and_ordering() {
        let a = VirtualNode::new(Token(100), NodeId::from("a"));
        let b = VirtualNode::new(Token(200), NodeId::from("b"));
        assert_eq!(a.distance_to(&b), 100);
        assert!(a < b);
    }
}
