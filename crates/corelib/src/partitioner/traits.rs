//! Core partitioner trait definitions.

use crate::token::Token;

/// A partitioner converts keys into tokens for placement on the hash ring.
///
/// Partitioners are stateless and thread-safe. They must be deterministic:
/// the same bytes always produce the same token, otherwise removing a node
/// would not find the positions that adding it created.
///
/// Swapping the partitioner of a ring changes the owner of (almost) every
/// key, so treat it as a breaking change for any stored key placement.
pub trait Partitioner: Send + Sync + 'static {
    /// Converts a key into a token.
    fn partition(&self, key: &[u8]) -> Token;

    /// Returns the name of this partitioner.
    fn name(&self) -> &'static str;
}

/// Folds a 64-bit digest onto the 32-bit ring, keeping entropy from both
/// halves.
#[inline]
pub(crate) fn fold64(hash: u64) -> Token {
    Token((hash ^ (hash >> 32)) as u32)
}
