//! Error types for stream I/O, configuration and replication.

/// Errors produced by the byte and bit streams.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    /// A byte read would run past the end of the reader's data.
    ///
    /// The reader's cursor and the output are left untouched.
    #[error("insufficient data: requested {requested} bytes, {remaining} remaining")]
    InsufficientData { requested: usize, remaining: usize },

    /// A bit read would run past the logical bit length of the reader.
    #[error("insufficient data: requested {requested} bits, {remaining} remaining")]
    InsufficientBits { requested: usize, remaining: usize },

    /// Growing a stream buffer to `requested` bytes could not obtain memory.
    #[error("failed to grow stream buffer to {requested} bytes")]
    AllocationFailure { requested: usize },

    /// More bits were requested than the primitive type holds.
    #[error("bit count {bit_count} exceeds the {width}-bit width of the value")]
    TooManyBits { bit_count: u32, width: u32 },

    /// A value read from the stream does not map to any variant of an enum.
    #[error("{value} is not a valid discriminant")]
    InvalidDiscriminant { value: u64 },
}

/// Errors produced when validating a [crate::config::StreamConfig].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Initial byte capacity is zero.
    #[error("initial byte capacity must be non-zero")]
    ZeroByteCapacity,
    /// Initial bit capacity is zero.
    #[error("initial bit capacity must be non-zero")]
    ZeroBitCapacity,
    /// Initial bit capacity is not a whole number of bytes.
    #[error("initial bit capacity {bits} is not a multiple of 8")]
    UnalignedBitCapacity { bits: usize },
}

/// Errors produced by [crate::replication::ReplicationSimulator].
///
/// Stream failures are tagged with the phase of the round trip they happened in.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplicationError {
    #[error("serialization failed: {0}")]
    Serialize(#[source] StreamError),
    #[error("deserialization failed: {0}")]
    Deserialize(#[source] StreamError),
    #[error("invalid stream configuration: {0}")]
    Config(#[from] ConfigError),
}
