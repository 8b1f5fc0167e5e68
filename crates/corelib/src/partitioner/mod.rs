//! Partitioner abstraction for consistent hashing.
//!
//! Partitioners are responsible for converting keys into tokens
//! that can be placed on the hash ring.

pub mod crc32;
pub mod sip;
pub mod traits;
pub mod xxh3;

use std::fmt;
use std::str::FromStr;

pub use crc32::Crc32Partitioner;
pub use sip::SipPartitioner;
pub use traits::Partitioner;
pub use xxh3::Xxh3Partitioner;

use crate::error::Error;
use crate::token::Token;

/// Runtime choice between the built-in partitioners.
///
/// Useful when the hash function comes from configuration rather than from
/// a type parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PartitionerKind {
    #[default]
    Crc32,
    Xxh3,
    Sip,
}

impl PartitionerKind {
    /// All built-in partitioners.
    pub const ALL: [PartitionerKind; 3] = [Self::Crc32, Self::Xxh3, Self::Sip];

    /// Short configuration name (`crc32`, `xxh3`, `sip`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Crc32 => "crc32",
            Self::Xxh3 => "xxh3",
            Self::Sip => "sip",
        }
    }
}

impl Partitioner for PartitionerKind {
    fn partition(&self, key: &[u8]) -> Token {
        match self {
            Self::Crc32 => Crc32Partitioner.partition(key),
            Self::Xxh3 => Xxh3Partitioner.partition(key),
            Self::Sip => SipPartitioner.partition(key),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Crc32 => Crc32Partitioner.name(),
            Self::Xxh3 => Xxh3Partitioner.name(),
            Self::Sip => SipPartitioner.name(),
        }
    }
}

impl FromStr for PartitionerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownPartitioner(s.to_string()))
    }
}

impl fmt::Display for PartitionerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
