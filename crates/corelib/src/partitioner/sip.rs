//! SipHash partitioner.

use crate::partitioner::traits::{fold64, Partitioner};
use crate::token::Token;
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// SipHash-1-3 partitioner with the all-zero key, folded onto the 32-bit
/// ring.
///
/// The key is fixed so tokens stay stable across processes; this is not a
/// defence against adversarial key choice.
#[derive(Clone, Copy, Debug, Default)]
pub struct SipPartitioner;

impl Partitioner for SipPartitioner {
    fn partition(&self, key: &[u8]) -> Token {
        let mut hasher = SipHasher13::new();
        hasher.write(key);
        fold64(hasher.finish())
    }

    fn name(&self) -> &'static str {
        "SipPartitioner"
    }
}
