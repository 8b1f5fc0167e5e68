//! Builder for pre-populated rings.

use crate::error::Result;
use crate::node::NodeId;
use crate::partitioner::{Crc32Partitioner, Partitioner};
use crate::ring::ring::{HashRing, DEFAULT_REPLICAS};

/// Builds a [`HashRing`] with its configuration and initial members.
///
/// ```rust
/// use hashring_core::partitioner::Xxh3Partitioner;
/// use hashring_core::RingBuilder;
///
/// let ring = RingBuilder::new()
///     .with_replicas(8)
///     .with_partitioner(Xxh3Partitioner)
///     .add_nodes(["shard-1", "shard-2"])
///     .build()
///     .unwrap();
/// assert_eq!(ring.token_count(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct RingBuilder<P = Crc32Partitioner> {
    replicas: usize,
    partitioner: P,
    nodes: Vec<NodeId>,
}

impl RingBuilder {
    /// Builder with [`DEFAULT_REPLICAS`] and the CRC32 partitioner.
    pub fn new() -> Self {
        Self {
            replicas: DEFAULT_REPLICAS,
            partitioner: Crc32Partitioner,
            nodes: Vec::new(),
        }
    }
}

impl Default for RingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Partitioner> RingBuilder<P> {
    pub fn with_replicas(mut self, replicas: usize) -> Self {
        self.replicas = replicas;
        self
    }

    pub fn with_partitioner<Q: Partitioner>(self, partitioner: Q) -> RingBuilder<Q> {
        RingBuilder {
            replicas: self.replicas,
            partitioner,
            nodes: self.nodes,
        }
    }

    pub fn add_node(mut self, node_id: impl Into<NodeId>) -> Self {
        self.nodes.push(node_id.into());
        self
    }

    pub fn add_nodes<I, N>(mut self, node_ids: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeId>,
    {
        self.nodes.extend(node_ids.into_iter().map(Into::into));
        self
    }

    /// Create the ring and add the configured nodes in order.
    ///
    /// Fails if the replica count is zero.
    pub fn build(self) -> Result<HashRing<P>> {
        let ring = HashRing::with_partitioner(self.replicas, self.partitioner)?;
        for node_id in self.nodes {
            ring.add_node(node_id);
        }
        Ok(ring)
    }
}
