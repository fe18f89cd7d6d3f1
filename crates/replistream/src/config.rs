//! Stream configuration.

use crate::errors::ConfigError;

/// Initial buffer sizes used when a stream is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    /// Bytes allocated up front by a [crate::byte_stream::ByteStreamWriter] (default: 32).
    pub initial_byte_capacity: usize,

    /// Bits allocated up front by a [crate::bit_stream::BitStreamWriter] (default: 2048).
    ///
    /// Must be a multiple of 8.
    pub initial_bit_capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        StreamConfig {
            initial_byte_capacity: 32,
            initial_bit_capacity: 256 * 8,
        }
    }
}

impl StreamConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set initial byte capacity (builder pattern).
    pub fn with_initial_byte_capacity(mut self, bytes: usize) -> Self {
        self.initial_byte_capacity = bytes;
        self
    }

    /// Set initial bit capacity (builder pattern).
    pub fn with_initial_bit_capacity(mut self, bits: usize) -> Self {
        self.initial_bit_capacity = bits;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_byte_capacity == 0 {
            return Err(ConfigError::ZeroByteCapacity);
        }
        if self.initial_bit_capacity == 0 {
            return Err(ConfigError::ZeroBitCapacity);
        }
        if self.initial_bit_capacity % 8 != 0 {
            return Err(ConfigError::UnalignedBitCapacity {
                bits: self.initial_bit_capacity,
            });
        }
        Ok(())
    }

    /// Tiny buffers, so that tests hit the growth paths after a few writes.
    pub fn for_testing() -> Self {
        StreamConfig {
            initial_byte_capacity: 2,
            initial_bit_capacity: 8,
        }
    }
}
