//! Error types for the core library.

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
///
/// The ring itself has almost no fallible paths: resolving against an empty
/// ring, hash collisions and removing unknown nodes are all handled without
/// an error. Only configuration is validated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A ring needs at least one virtual node per physical node.
    #[error("invalid replica count {0}: must be at least 1")]
    InvalidReplicaCount(usize),

    /// Partitioner name that does not match any known implementation.
    #[error("unknown partitioner: {0}")]
    UnknownPartitioner(String),
}
