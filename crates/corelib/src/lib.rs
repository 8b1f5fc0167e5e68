//! Core library for consistent hashing.
//!
//! This crate provides the consistent hash ring and its building blocks:
//! - Tokens (positions on a 32-bit circular hash space)
//! - Partitioners (hash functions mapping keys to tokens)
//! - Node identifiers and virtual nodes
//! - The ring itself, safe to mutate while lookups proceed

pub mod error;
pub mod node;
pub mod partitioner;
pub mod ring;
pub mod token;
pub mod vnode;

pub use error::{Error, Result};
pub use node::NodeId;
pub use partitioner::{Partitioner, PartitionerKind};
pub use ring::{HashRing, Ring, RingBuilder, RingSnapshot};
pub use token::Token;
pub use vnode::VirtualNode;
