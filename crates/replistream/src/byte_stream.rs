//! Byte-aligned output and input streams.
//!
//! Every value is stored in little-endian wire order at the next free byte,
//! with no padding and no framing.

use crate::{
    byte_order::{from_wire, to_wire},
    config::StreamConfig,
    errors::StreamError,
    primitive::{MAX_PRIMITIVE_SIZE, Primitive},
};

/// Growable, append-only byte stream.
///
/// Bytes `[0, len())` are the written data. Growth doubles the capacity, or
/// grows to exactly the required size when doubling is not enough, and always
/// preserves the bytes already written.
#[derive(Debug, Clone)]
pub struct ByteStreamWriter {
    // Zero-filled up to `capacity`; `head` bytes of it are valid.
    buffer: Vec<u8>,
    head: usize,
}

impl ByteStreamWriter {
    /// Creates a writer with the default initial capacity.
    pub fn new() -> Result<Self, StreamError> {
        Self::with_config(&StreamConfig::default())
    }

    pub fn with_config(config: &StreamConfig) -> Result<Self, StreamError> {
        Self::with_capacity(config.initial_byte_capacity)
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, StreamError> {
        let mut writer = ByteStreamWriter {
            buffer: Vec::new(),
            head: 0,
        };
        writer.realloc(capacity)?;
        Ok(writer)
    }

    /// Number of bytes written.
    pub fn len(&self) -> usize {
        self.head
    }

    pub fn is_empty(&self) -> bool {
        self.head == 0
    }

    /// Number of bytes the writer can hold before it has to grow.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// The bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.head]
    }

    pub fn into_bytes(mut self) -> Vec<u8> {
        self.buffer.truncate(self.head);
        self.buffer
    }

    /// Rewinds the cursor, keeping the allocation.
    pub fn clear(&mut self) {
        self.buffer[..self.head].fill(0);
        self.head = 0;
    }

    /// Appends `value` in wire order.
    pub fn write<T: Primitive>(&mut self, value: T) -> Result<(), StreamError> {
        let mut raw = [0u8; MAX_PRIMITIVE_SIZE];
        to_wire(value).write_ne(&mut raw);
        self.write_bytes(&raw[..T::SIZE])
    }

    /// Appends every element of `values` in wire order, as one contiguous block.
    pub fn write_array<T: Primitive, const N: usize>(
        &mut self,
        values: &[T; N],
    ) -> Result<(), StreamError> {
        let byte_count = T::SIZE * N;
        self.reserve(byte_count)?;

        let start = self.head;
        for (value, chunk) in values
            .iter()
            .zip(self.buffer[start..start + byte_count].chunks_exact_mut(T::SIZE))
        {
            to_wire(*value).write_ne(chunk);
        }

        self.head += byte_count;
        Ok(())
    }

    /// Appends raw, already wire-ordered bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), StreamError> {
        self.reserve(bytes.len())?;
        self.buffer[self.head..self.head + bytes.len()].copy_from_slice(bytes);
        self.head += bytes.len();
        Ok(())
    }

    fn reserve(&mut self, additional: usize) -> Result<(), StreamError> {
        let required = self
            .head
            .checked_add(additional)
            .ok_or(StreamError::AllocationFailure {
                requested: usize::MAX,
            })?;

        if required > self.capacity() {
            let new_capacity = self.capacity().saturating_mul(2).max(required);
            self.realloc(new_capacity)?;
        }

        Ok(())
    }

    fn realloc(&mut self, new_capacity: usize) -> Result<(), StreamError> {
        let old_capacity = self.buffer.len();
        self.buffer
            .try_reserve_exact(new_capacity.saturating_sub(old_capacity))
            .map_err(|_| StreamError::AllocationFailure {
                requested: new_capacity,
            })?;
        self.buffer.resize(new_capacity, 0);

        tracing::trace!(old_capacity, new_capacity, "byte stream buffer grown");
        Ok(())
    }
}

/// Read-only cursor over a borrowed byte buffer.
///
/// A failed read leaves both the cursor and the destination untouched.
#[derive(Debug, Clone)]
pub struct ByteStreamReader<'a> {
    data: &'a [u8],
    head: usize,
}

impl<'a> ByteStreamReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, head: 0 }
    }

    /// Wraps the first `len` bytes of `data`.
    ///
    /// `len` is clamped to the size of `data`.
    pub fn with_length(data: &'a [u8], len: usize) -> Self {
        Self::new(&data[..len.min(data.len())])
    }

    /// Total number of bytes the reader was created over.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.head
    }

    /// True when the reader was created over no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True once every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    pub fn position(&self) -> usize {
        self.head
    }

    pub fn read<T: Primitive>(&mut self) -> Result<T, StreamError> {
        let bytes = self.take(T::SIZE)?;
        Ok(from_wire(T::read_ne(bytes)))
    }

    /// Reads a value into `out`. On failure `out` is not modified.
    pub fn read_into<T: Primitive>(&mut self, out: &mut T) -> Result<(), StreamError> {
        *out = self.read()?;
        Ok(())
    }

    /// Fills `out` element by element. On failure `out` is not modified.
    pub fn read_array_into<T: Primitive, const N: usize>(
        &mut self,
        out: &mut [T; N],
    ) -> Result<(), StreamError> {
        let bytes = self.take(T::SIZE * N)?;
        for (value, chunk) in out.iter_mut().zip(bytes.chunks_exact(T::SIZE)) {
            *value = from_wire(T::read_ne(chunk));
        }
        Ok(())
    }

    /// Reads `out.len()` raw bytes.
    pub fn read_bytes_into(&mut self, out: &mut [u8]) -> Result<(), StreamError> {
        let bytes = self.take(out.len())?;
        out.copy_from_slice(bytes);
        Ok(())
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8], StreamError> {
        let remaining = self.remaining();
        if count > remaining {
            return Err(StreamError::InsufficientData {
                requested: count,
                remaining,
            });
        }

        let data = self.data;
        let bytes = &data[self.head..self.head + count];
        self.head += count;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_stores_little_endian() {
        let mut writer = ByteStreamWriter::new().unwrap();
        writer.write(0x1122_3344u32).unwrap();
        writer.write(0xaabbu16).unwrap();

        assert_eq!(writer.len(), 6);
        assert_eq!(writer.as_bytes(), &[0x44, 0x33, 0x22, 0x11, 0xbb, 0xaa]);
    }

    #[test]
    fn test_write_array() {
        let mut writer = ByteStreamWriter::new().unwrap();
        writer.write_array(&[1u16, 2, 3]).unwrap();
        assert_eq!(writer.as_bytes(), &[1, 0, 2, 0, 3, 0]);
    }

    #[test]
    fn test_growth_doubles_capacity() {
        let mut writer = ByteStreamWriter::with_capacity(4).unwrap();
        writer.write(1u32).unwrap();
        assert_eq!(writer.capacity(), 4);

        writer.write(2u8).unwrap();
        assert_eq!(writer.capacity(), 8);
        assert_eq!(writer.as_bytes(), &[1, 0, 0, 0, 2]);
    }

    #[test]
    fn test_growth_to_required_size() {
        let mut writer = ByteStreamWriter::with_capacity(2).unwrap();
        writer.write_array(&[7u64; 2]).unwrap();
        assert_eq!(writer.capacity(), 16);
        assert_eq!(writer.len(), 16);
    }

    #[test]
    fn test_growth_from_zero_capacity() {
        let mut writer = ByteStreamWriter::with_capacity(0).unwrap();
        writer.write(9u8).unwrap();
        assert_eq!(writer.capacity(), 1);
        assert_eq!(writer.as_bytes(), &[9]);
    }

    #[test]
    fn test_capacity_reached_then_reallocation_happens() {
        let mut writer = ByteStreamWriter::new().unwrap();
        let initial_capacity = writer.capacity();

        for _ in 0..=initial_capacity {
            writer.write(b'A').unwrap();
        }

        assert!(writer.capacity() > initial_capacity);
        assert_eq!(writer.len(), initial_capacity + 1);
    }

    #[test]
    fn test_clear_keeps_allocation() {
        let mut writer = ByteStreamWriter::with_capacity(4).unwrap();
        writer.write(u64::MAX).unwrap();
        let capacity = writer.capacity();

        writer.clear();
        assert!(writer.is_empty());
        assert_eq!(writer.capacity(), capacity);
    }

    #[test]
    fn test_into_bytes_truncates_to_len() {
        let mut writer = ByteStreamWriter::new().unwrap();
        writer.write(true).unwrap();
        assert_eq!(writer.into_bytes(), vec![1]);
    }

    #[test]
    fn test_read_values() {
        let data = [0x44, 0x33, 0x22, 0x11, 0xbb, 0xaa];
        let mut reader = ByteStreamReader::new(&data);

        assert_eq!(reader.read::<u32>().unwrap(), 0x1122_3344);
        assert_eq!(reader.remaining(), 2);
        assert_eq!(reader.read::<u16>().unwrap(), 0xaabb);
        assert!(reader.is_exhausted());
        assert!(!reader.is_empty());
    }

    #[test]
    fn test_read_insufficient_data_leaves_state_untouched() {
        let data = [1, 2, 3];
        let mut reader = ByteStreamReader::new(&data);
        let mut out = 0xdead_beefu32;

        assert_eq!(
            reader.read_into(&mut out),
            Err(StreamError::InsufficientData {
                requested: 4,
                remaining: 3
            })
        );
        assert_eq!(out, 0xdead_beef);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_read_array_insufficient_data() {
        let data = [1, 0, 2, 0, 3];
        let mut reader = ByteStreamReader::new(&data);
        let mut out = [9u16; 3];

        assert!(reader.read_array_into(&mut out).is_err());
        assert_eq!(out, [9, 9, 9]);
        assert_eq!(reader.remaining(), 5);
    }

    #[test]
    fn test_read_array() {
        let data = [1, 0, 2, 0, 3, 0];
        let mut reader = ByteStreamReader::new(&data);
        let mut out = [0u16; 3];

        reader.read_array_into(&mut out).unwrap();
        assert_eq!(out, [1, 2, 3]);
    }

    #[test]
    fn test_with_length_limits_reader() {
        let data = [1, 2, 3, 4];
        let mut reader = ByteStreamReader::with_length(&data, 2);
        assert_eq!(reader.len(), 2);
        assert_eq!(reader.read::<u16>().unwrap(), 0x0201);
        assert!(reader.read::<u8>().is_err());
    }

    #[test]
    fn test_signed_and_float_round_trip() {
        let mut writer = ByteStreamWriter::new().unwrap();
        writer.write(-42i32).unwrap();
        writer.write(3.75f64).unwrap();
        writer.write(false).unwrap();

        let mut reader = ByteStreamReader::new(writer.as_bytes());
        assert_eq!(reader.read::<i32>().unwrap(), -42);
        assert_eq!(reader.read::<f64>().unwrap(), 3.75);
        assert!(!reader.read::<bool>().unwrap());
    }

    #[test]
    fn test_empty_reader_is_exhausted() {
        let reader = ByteStreamReader::new(&[]);
        assert!(reader.is_empty());
        assert!(reader.is_exhausted());
    }

    #[test]
    fn test_allocation_failure_is_reported() {
        assert_eq!(
            ByteStreamWriter::with_capacity(usize::MAX).unwrap_err(),
            StreamError::AllocationFailure {
                requested: usize::MAX
            }
        );

        let mut writer = ByteStreamWriter::with_capacity(4).unwrap();
        writer.write(0x0102u16).unwrap();

        // Past `isize::MAX` bytes, which no allocation can satisfy.
        writer.head = usize::MAX / 2;
        assert!(matches!(
            writer.write(7u32),
            Err(StreamError::AllocationFailure { .. })
        ));
        assert_eq!(writer.head, usize::MAX / 2);
        assert_eq!(writer.capacity(), 4);

        writer.head = usize::MAX - 1;
        assert_eq!(
            writer.write(7u32),
            Err(StreamError::AllocationFailure {
                requested: usize::MAX
            })
        );
        assert_eq!(writer.head, usize::MAX - 1);

        writer.head = 2;
        assert_eq!(writer.as_bytes(), &[0x02, 0x01]);
    }
}
