//! Bit-granular output and input streams.
//!
//! Bits are packed least-significant-bit first within each byte. A value of
//! 8 bits or more is laid out in little-endian wire order, so the low byte of
//! the value is the first one written. There is no padding between values.
//!
//! ```text
//! write_bits(0b101, 3) then write_bits(0x1ff, 9):
//!
//!   byte 0: 1111_1101   (low 5 bits of 0x1ff above 0b101)
//!   byte 1: 0000_1111   (remaining 4 bits, high bits unwritten)
//! ```

use crate::{
    byte_order::to_wire,
    config::StreamConfig,
    errors::StreamError,
    primitive::{MAX_PRIMITIVE_SIZE, Primitive},
};

/// Extra bytes kept past the logical capacity so that a full-width spill
/// never lands outside the allocation.
pub const HEADROOM_BYTES: usize = MAX_PRIMITIVE_SIZE;

/// Growable, append-only bit stream.
#[derive(Debug, Clone)]
pub struct BitStreamWriter {
    // `bit_capacity / 8 + HEADROOM_BYTES` bytes, zero-filled when allocated.
    buffer: Vec<u8>,
    bit_head: usize,
    bit_capacity: usize,
}

impl BitStreamWriter {
    /// Creates a writer with the default initial bit capacity.
    pub fn new() -> Result<Self, StreamError> {
        Self::with_config(&StreamConfig::default())
    }

    pub fn with_config(config: &StreamConfig) -> Result<Self, StreamError> {
        Self::with_bit_capacity(config.initial_bit_capacity)
    }

    /// Creates a writer able to hold `bits` bits before growing, rounded up
    /// to a whole byte.
    pub fn with_bit_capacity(bits: usize) -> Result<Self, StreamError> {
        let mut writer = BitStreamWriter {
            buffer: Vec::new(),
            bit_head: 0,
            bit_capacity: 0,
        };
        let bit_capacity = round_up_to_byte(bits).ok_or(StreamError::AllocationFailure {
            requested: usize::MAX,
        })?;
        writer.realloc(bit_capacity)?;
        Ok(writer)
    }

    /// Number of bits written.
    pub fn bit_length(&self) -> usize {
        self.bit_head
    }

    /// Number of bytes touched by the written bits, including a partially
    /// filled trailing byte.
    pub fn byte_length(&self) -> usize {
        self.bit_head.div_ceil(8)
    }

    pub fn bit_capacity(&self) -> usize {
        self.bit_capacity
    }

    pub fn is_empty(&self) -> bool {
        self.bit_head == 0
    }

    pub fn is_byte_aligned(&self) -> bool {
        self.bit_head % 8 == 0
    }

    /// The bytes written so far. Unwritten high bits of the trailing byte are zero.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.byte_length()]
    }

    pub fn into_bytes(mut self) -> Vec<u8> {
        self.buffer.truncate(self.byte_length());
        self.buffer
    }

    /// Appends the low `bit_count` bits of `value`.
    ///
    /// A `bit_count` of zero writes nothing. Asking for more bits than `T`
    /// holds fails with [StreamError::TooManyBits].
    pub fn write_bits<T: Primitive>(&mut self, value: T, bit_count: u32) -> Result<(), StreamError> {
        if bit_count > T::BITS {
            return Err(StreamError::TooManyBits {
                bit_count,
                width: T::BITS,
            });
        }
        if bit_count == 0 {
            return Ok(());
        }

        self.reserve_bits(bit_count as usize)?;
        self.write_raw(value.to_raw() & low_mask(bit_count), bit_count);
        Ok(())
    }

    /// Appends every bit of `value`.
    pub fn write<T: Primitive>(&mut self, value: T) -> Result<(), StreamError> {
        self.write_bits(value, T::BITS)
    }

    /// Appends a single bit.
    pub fn write_bool(&mut self, value: bool) -> Result<(), StreamError> {
        self.write_bits(value, 1)
    }

    /// Appends every element of `values` at full width.
    pub fn write_array<T: Primitive, const N: usize>(
        &mut self,
        values: &[T; N],
    ) -> Result<(), StreamError> {
        self.reserve_bits(T::BITS as usize * N)?;
        for value in values {
            self.write_raw(value.to_raw(), T::BITS);
        }
        Ok(())
    }

    /// Pads with zero bits up to the next byte boundary.
    pub fn align_to_byte(&mut self) -> Result<(), StreamError> {
        let padding = (8 - (self.bit_head % 8) as u32) % 8;
        if padding != 0 {
            self.reserve_bits(padding as usize)?;
            self.write_raw(0, padding);
        }
        Ok(())
    }

    // `raw` holds exactly `bit_count` significant bits and the capacity has
    // already been reserved.
    fn write_raw(&mut self, mut raw: u64, bit_count: u32) {
        let mut next_byte = self.bit_head >> 3;
        let bit_offset = (self.bit_head & 0x7) as u32;
        let mut remaining = bit_count;

        if bit_offset != 0 {
            // Keep the bits already written in the trailing byte, fill the rest.
            let keep_mask = !(0xffu8 << bit_offset);
            let trailing = &mut self.buffer[next_byte];
            *trailing = (*trailing & keep_mask) | (raw << bit_offset) as u8;

            let consumed = (8 - bit_offset).min(bit_count);
            raw >>= consumed;
            remaining -= consumed;
            next_byte += 1;
        }

        if remaining != 0 {
            let byte_count = remaining.div_ceil(8) as usize;
            let spill = to_wire(raw).to_ne_bytes();
            self.buffer[next_byte..next_byte + byte_count].copy_from_slice(&spill[..byte_count]);
        }

        self.bit_head += bit_count as usize;
    }

    fn reserve_bits(&mut self, additional: usize) -> Result<(), StreamError> {
        let required = self
            .bit_head
            .checked_add(additional)
            .ok_or(StreamError::AllocationFailure {
                requested: usize::MAX,
            })?;

        if required > self.bit_capacity {
            let required = round_up_to_byte(required).ok_or(StreamError::AllocationFailure {
                requested: usize::MAX,
            })?;
            let new_capacity = self.bit_capacity.saturating_mul(2).max(required);
            self.realloc(new_capacity)?;
        }

        Ok(())
    }

    fn realloc(&mut self, new_bit_capacity: usize) -> Result<(), StreamError> {
        let new_len = (new_bit_capacity / 8)
            .checked_add(HEADROOM_BYTES)
            .ok_or(StreamError::AllocationFailure {
                requested: usize::MAX,
            })?;
        let old_len = self.buffer.len();

        self.buffer
            .try_reserve_exact(new_len.saturating_sub(old_len))
            .map_err(|_| StreamError::AllocationFailure { requested: new_len })?;
        self.buffer.resize(new_len, 0);

        tracing::trace!(
            old_bit_capacity = self.bit_capacity,
            new_bit_capacity,
            "bit stream buffer grown"
        );
        self.bit_capacity = new_bit_capacity;
        Ok(())
    }
}

/// Read-only bit cursor over a borrowed byte buffer.
///
/// A failed read leaves both the cursor and the destination untouched.
#[derive(Debug, Clone)]
pub struct BitStreamReader<'a> {
    data: &'a [u8],
    bit_len: usize,
    bit_pos: usize,
}

impl<'a> BitStreamReader<'a> {
    /// Reads every bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_len: data.len() * 8,
            bit_pos: 0,
        }
    }

    /// Reads only the first `bit_len` bits of `data`, typically the
    /// [BitStreamWriter::bit_length] of the writer that produced it.
    pub fn with_bit_length(data: &'a [u8], bit_len: usize) -> Self {
        Self {
            data,
            bit_len: bit_len.min(data.len() * 8),
            bit_pos: 0,
        }
    }

    pub fn bit_length(&self) -> usize {
        self.bit_len
    }

    pub fn position(&self) -> usize {
        self.bit_pos
    }

    pub fn remaining_bits(&self) -> usize {
        self.bit_len - self.bit_pos
    }

    /// True once every bit has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining_bits() == 0
    }

    /// Reads `bit_count` bits (at most 64) without moving the cursor.
    pub fn peek_raw(&self, bit_count: u32) -> Result<u64, StreamError> {
        if bit_count > u64::BITS {
            return Err(StreamError::TooManyBits {
                bit_count,
                width: u64::BITS,
            });
        }
        self.check_remaining(bit_count as usize)?;

        let mut value = 0u64;
        let mut filled = 0u32;
        let mut pos = self.bit_pos;

        while filled < bit_count {
            let bit_offset = (pos & 0x7) as u32;
            let take = (8 - bit_offset).min(bit_count - filled);
            let bits = (self.data[pos >> 3] >> bit_offset) as u64 & low_mask(take);

            value |= bits << filled;
            filled += take;
            pos += take as usize;
        }

        Ok(value)
    }

    /// Reads `bit_count` bits (at most 64) as an unsigned value.
    pub fn read_raw(&mut self, bit_count: u32) -> Result<u64, StreamError> {
        let value = self.peek_raw(bit_count)?;
        self.bit_pos += bit_count as usize;
        Ok(value)
    }

    /// Reads `bit_count` bits into the low bits of a `T`; the high bits are zero.
    pub fn read_bits<T: Primitive>(&mut self, bit_count: u32) -> Result<T, StreamError> {
        if bit_count > T::BITS {
            return Err(StreamError::TooManyBits {
                bit_count,
                width: T::BITS,
            });
        }
        self.read_raw(bit_count).map(T::from_raw)
    }

    /// Reads a full-width `T`.
    pub fn read<T: Primitive>(&mut self) -> Result<T, StreamError> {
        self.read_bits(T::BITS)
    }

    /// Reads `bit_count` bits into `out`. On failure `out` is not modified.
    pub fn read_into<T: Primitive>(&mut self, out: &mut T, bit_count: u32) -> Result<(), StreamError> {
        *out = self.read_bits(bit_count)?;
        Ok(())
    }

    /// Reads `bit_count` bits and sign-extends them from bit `bit_count - 1`.
    pub fn read_signed<T: Primitive>(&mut self, bit_count: u32) -> Result<T, StreamError> {
        if bit_count > T::BITS {
            return Err(StreamError::TooManyBits {
                bit_count,
                width: T::BITS,
            });
        }
        let raw = self.read_raw(bit_count)?;
        Ok(T::from_raw(sign_extend(raw, bit_count) as u64))
    }

    pub fn read_bool(&mut self) -> Result<bool, StreamError> {
        self.read_bits(1)
    }

    /// Fills `out` with full-width elements. On failure `out` is not modified.
    pub fn read_array_into<T: Primitive, const N: usize>(
        &mut self,
        out: &mut [T; N],
    ) -> Result<(), StreamError> {
        self.check_remaining(T::BITS as usize * N)?;
        for value in out.iter_mut() {
            *value = self.read()?;
        }
        Ok(())
    }

    pub fn skip_bits(&mut self, bit_count: usize) -> Result<(), StreamError> {
        self.check_remaining(bit_count)?;
        self.bit_pos += bit_count;
        Ok(())
    }

    /// Moves the cursor to the next byte boundary, skipping padding bits.
    pub fn align_to_byte(&mut self) -> Result<(), StreamError> {
        let rem = self.bit_pos % 8;
        if rem != 0 {
            self.skip_bits(8 - rem)?;
        }
        Ok(())
    }

    fn check_remaining(&self, requested: usize) -> Result<(), StreamError> {
        let remaining = self.remaining_bits();
        if requested > remaining {
            return Err(StreamError::InsufficientBits {
                requested,
                remaining,
            });
        }
        Ok(())
    }
}

/// Sign-extends the low `bits` of `value` to a full `i64`.
///
/// Zero bits extend to `0`; 64 or more bits reinterpret `value` unchanged.
pub fn sign_extend(value: u64, bits: u32) -> i64 {
    match bits {
        0 => 0,
        1..=63 => {
            let shift = u64::BITS - bits;
            ((value << shift) as i64) >> shift
        }
        _ => value as i64,
    }
}

#[inline]
fn low_mask(bit_count: u32) -> u64 {
    if bit_count >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bit_count) - 1
    }
}

/// `None` when the rounded value does not fit in a `usize`.
#[inline]
fn round_up_to_byte(bits: usize) -> Option<usize> {
    bits.div_ceil(8).checked_mul(8)
}
