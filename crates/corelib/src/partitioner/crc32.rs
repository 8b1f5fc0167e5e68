//! CRC32 (IEEE) partitioner, the ring default.

use crate::partitioner::traits::Partitioner;
use crate::token::Token;

/// CRC32 partitioner.
///
/// The IEEE checksum is a 32-bit value already, so it maps onto the ring
/// without folding.
#[derive(Clone, Copy, Debug, Default)]
pub struct Crc32Partitioner;

impl Partitioner for Crc32Partitioner {
    fn partition(&self, key: &[u8]) -> Token {
        Token(crc32fast::hash(key))
    }

    fn name(&self) -> &'static str {
        "Crc32Partitioner"
    }
}
