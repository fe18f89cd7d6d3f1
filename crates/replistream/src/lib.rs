//! # replistream
//!
//! Binary serialization streams for simulating network replication of
//! in-memory objects.
//!
//! Values travel through one of two streams:
//! - a byte stream ([byte_stream]) that stores fixed-width fields back to
//!   back in little-endian wire order;
//! - a bit stream ([bit_stream]) that packs an arbitrary number of low bits of
//!   each field, least-significant bit first, across byte boundaries.
//!
//! Entities opt in by implementing [entity::Serializable] and/or
//! [entity::BitSerializable], and [replication::ReplicationSimulator] proves a
//! round trip depends only on the transmitted bytes.
//!
//! ## Example
//!
//! ```
//! use replistream::bit_stream::{BitStreamReader, BitStreamWriter};
//!
//! let mut writer = BitStreamWriter::new().unwrap();
//! writer.write_bits(2042u32, 11).unwrap();
//! writer.write_bits(100u16, 7).unwrap();
//! assert_eq!(writer.bit_length(), 18);
//! assert_eq!(writer.byte_length(), 3);
//!
//! let mut reader = BitStreamReader::with_bit_length(writer.as_bytes(), writer.bit_length());
//! assert_eq!(reader.read_bits::<u32>(11).unwrap(), 2042);
//! assert_eq!(reader.read_bits::<u16>(7).unwrap(), 100);
//! ```

pub mod bit_stream;
pub mod byte_order;
pub mod byte_stream;
pub mod config;
pub mod entity;
pub mod errors;
pub mod primitive;
pub mod replication;
#[cfg(feature = "serde")]
pub mod serde;
