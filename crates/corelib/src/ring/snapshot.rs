//! Point-in-time view of a ring.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::node::NodeId;
use crate::vnode::VirtualNode;

/// Copy of a ring's placement, taken under a single read lock.
///
/// Intended for display and diagnostics; rings are never restored from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RingSnapshot {
    pub partitioner: &'static str,
    pub replicas: usize,
    /// Virtual nodes in ascending token order.
    pub vnodes: Vec<VirtualNode>,
}

impl RingSnapshot {
    /// Distinct owners present in the snapshot.
    pub fn nodes(&self) -> BTreeSet<NodeId> {
        self.vnodes.iter().map(|v| v.node_id.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.vnodes.is_empty()
    }
}
