//! XXH3 partitioner.

use crate::partitioner::traits::{fold64, Partitioner};
use crate::token::Token;
use xxhash_rust::xxh3::xxh3_64;

/// XXH3-64 partitioner, folded onto the 32-bit ring.
#[derive(Clone, Copy, Debug, Default)]
pub struct Xxh3Partitioner;

impl Partitioner for Xxh3Partitioner {
    fn partition(&self, key: &[u8]) -> Token {
        fold64(xxh3_64(key))
    }

    fn name(&self) -> &'static str {
        "Xxh3Partitioner"
    }
}
