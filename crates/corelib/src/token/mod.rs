//! Ring positions.
//!
//! A token is a point on the circular 32-bit hash space. Tokens are produced
//! by a [`Partitioner`](crate::partitioner::Partitioner) and wrap from
//! `u32::MAX` back to `0`.

use std::fmt;

use serde::Serialize;

/// Position on the ring.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Token(pub u32);

/// Number of distinct positions on the ring (2^32).
pub const RING_SIZE: u64 = 1 << 32;

impl Token {
    /// Minimum token value (start of ring).
    pub const ZERO: Token = Token(0);
    /// Maximum token value (end of ring).
    pub const MAX: Token = Token(u32::MAX);

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn is_max(self) -> bool {
        self.0 == u32::MAX
    }

    /// Clockwise distance from `self` to `other`, wrapping past `MAX`.
    ///
    /// The distance from a token to itself is zero.
    #[inline]
    pub fn distance_to(self, other: Token) -> u32 {
        other.0.wrapping_sub(self.0)
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}
