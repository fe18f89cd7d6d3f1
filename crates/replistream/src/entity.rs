//! The contract a value implements to travel through the streams.
//!
//! An implementation writes its fields one by one, in a fixed declaration
//! order, and reads them back in exactly the same order. Nothing on the wire
//! records that order, so a mismatch between the two methods is not detected:
//! it surfaces as garbage values, a short read, or unread trailing data.
//!
//! Only fixed-width fields fit this contract. Variable-length fields (vectors,
//! strings) need a length-prefixed encoding of their own.
//!
//! ```
//! use replistream::{
//!     byte_stream::{ByteStreamReader, ByteStreamWriter},
//!     entity::Serializable,
//!     errors::StreamError,
//! };
//!
//! #[derive(Default, PartialEq, Debug)]
//! struct Position {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Serializable for Position {
//!     fn serialize(&self, writer: &mut ByteStreamWriter) -> Result<(), StreamError> {
//!         writer.write(self.x)?;
//!         writer.write(self.y)
//!     }
//!
//!     fn deserialize(&mut self, reader: &mut ByteStreamReader<'_>) -> Result<(), StreamError> {
//!         reader.read_into(&mut self.x)?;
//!         reader.read_into(&mut self.y)
//!     }
//! }
//!
//! let mut writer = ByteStreamWriter::new().unwrap();
//! Position { x: -3, y: 7 }.serialize(&mut writer).unwrap();
//!
//! let mut copy = Position::default();
//! copy.deserialize(&mut ByteStreamReader::new(writer.as_bytes())).unwrap();
//! assert_eq!(copy, Position { x: -3, y: 7 });
//! ```
//!
//! # Enums
//!
//! A field-less enum travels as its `repr` integer. Write it with an `as`
//! cast and rebuild it with a `TryFrom` impl, reporting unknown values as
//! [StreamError::InvalidDiscriminant]:
//!
//! ```
//! use replistream::{
//!     bit_stream::{BitStreamReader, BitStreamWriter},
//!     errors::StreamError,
//! };
//!
//! #[repr(u8)]
//! #[derive(Clone, Copy, Debug, PartialEq)]
//! enum Stance {
//!     Idle = 0,
//!     Walking = 1,
//!     Pouncing = 2,
//! }
//!
//! impl TryFrom<u8> for Stance {
//!     type Error = StreamError;
//!
//!     fn try_from(value: u8) -> Result<Self, StreamError> {
//!         match value {
//!             0 => Ok(Stance::Idle),
//!             1 => Ok(Stance::Walking),
//!             2 => Ok(Stance::Pouncing),
//!             _ => Err(StreamError::InvalidDiscriminant { value: value.into() }),
//!         }
//!     }
//! }
//!
//! let mut writer = BitStreamWriter::new().unwrap();
//! writer.write_bits(Stance::Pouncing as u8, 2).unwrap();
//! writer.write_bits(3u8, 2).unwrap();
//!
//! let mut reader = BitStreamReader::with_bit_length(writer.as_bytes(), writer.bit_length());
//! assert_eq!(Stance::try_from(reader.read_bits::<u8>(2).unwrap()), Ok(Stance::Pouncing));
//! assert_eq!(
//!     Stance::try_from(reader.read_bits::<u8>(2).unwrap()),
//!     Err(StreamError::InvalidDiscriminant { value: 3 })
//! );
//! ```

use crate::{
    bit_stream::{BitStreamReader, BitStreamWriter},
    byte_stream::{ByteStreamReader, ByteStreamWriter},
    errors::StreamError,
};

/// A value that can be written to and rebuilt from a byte stream.
pub trait Serializable {
    /// Writes every field, in declaration order.
    fn serialize(&self, writer: &mut ByteStreamWriter) -> Result<(), StreamError>;

    /// Overwrites every field from `reader`, in the order used by [Serializable::serialize].
    fn deserialize(&mut self, reader: &mut ByteStreamReader<'_>) -> Result<(), StreamError>;
}

/// A value that can be packed into and rebuilt from a bit stream.
///
/// Implementations choose a bit count per field; the read side must use the
/// same counts.
pub trait BitSerializable {
    fn serialize_bits(&self, writer: &mut BitStreamWriter) -> Result<(), StreamError>;

    fn deserialize_bits(&mut self, reader: &mut BitStreamReader<'_>) -> Result<(), StreamError>;
}
