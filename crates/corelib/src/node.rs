//! Physical node identity.
//!
//! Nodes are not objects on the ring: a physical node is known purely by its
//! identifier, and every virtual node position is recomputed from it on
//! demand.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// Opaque identifier of a physical node (a server, a shard, a replica...).
///
/// Backed by an `Arc<str>` so the R virtual nodes of one physical node share
/// a single allocation and cloning an owner out of the ring is cheap.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(Arc<str>);

impl NodeId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({:?})", &*self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl From<&String> for NodeId {
    fn from(id: &String) -> Self {
        Self::new(id)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_display_is_verbatim() {
        let id = NodeId::from("Server1");
        assert_eq!(id.to_string(), "Server1");
        assert_eq!(id, "Server1");
    }

    #[test]
    fn test_node_id_conversions_agree() {
        let owned = String::from("cache-7");
        assert_eq!(NodeId::from(&owned), NodeId::from(owned.clone()));
        assert_eq!(NodeId::new("cache-7").as_str(), "cache-7");
    }
}
