//! Sample entity replicated by the demo.

use replistream::{
    bit_stream::{BitStreamReader, BitStreamWriter},
    byte_stream::{ByteStreamReader, ByteStreamWriter},
    entity::{BitSerializable, Serializable},
    errors::StreamError,
};

pub const NAME_SIZE: usize = 16;

/// Health fits in 10 bits on the bit stream.
const HEALTH_BITS: u32 = 10;
const MEOW_COUNT_BITS: u32 = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct RoboCat {
    health: i32,
    meow_count: i32,
    name: [u8; NAME_SIZE],
    is_awake: bool,
    distance: u64,
    naps: u32,
    // Variable length; not part of the fixed-width wire format.
    mice_indices: Vec<i32>,
}

impl Default for RoboCat {
    fn default() -> Self {
        let mut name = [0u8; NAME_SIZE];
        name[..7].copy_from_slice(b"Unknown");
        RoboCat {
            health: 10,
            meow_count: 3,
            name,
            is_awake: true,
            distance: 9_876_543_210,
            naps: 123_456_789,
            mice_indices: Vec::new(),
        }
    }
}

impl RoboCat {
    pub fn new(health: i32, meow_count: i32) -> Self {
        RoboCat {
            health,
            meow_count,
            ..Default::default()
        }
    }

    /// Sets the name, truncated to [NAME_SIZE] bytes.
    pub fn with_name(mut self, name: &str) -> Self {
        let bytes = name.as_bytes();
        let len = bytes.len().min(NAME_SIZE);
        self.name = [0u8; NAME_SIZE];
        self.name[..len].copy_from_slice(&bytes[..len]);
        self
    }

    pub fn with_mice(mut self, mice_indices: Vec<i32>) -> Self {
        self.mice_indices = mice_indices;
        self
    }

    pub fn name(&self) -> &str {
        let end = self
            .name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(NAME_SIZE);
        std::str::from_utf8(&self.name[..end]).unwrap_or("")
    }

    pub fn mice_indices(&self) -> &[i32] {
        &self.mice_indices
    }

    /// Compares only the state carried on the wire.
    pub fn same_replicated_state(&self, other: &RoboCat) -> bool {
        self.health == other.health
            && self.meow_count == other.meow_count
            && self.name == other.name
            && self.is_awake == other.is_awake
            && self.distance == other.distance
            && self.naps == other.naps
    }
}

impl Serializable for RoboCat {
    fn serialize(&self, writer: &mut ByteStreamWriter) -> Result<(), StreamError> {
        writer.write(self.health)?;
        writer.write(self.meow_count)?;
        writer.write_array(&self.name)?;
        writer.write(self.is_awake)?;
        writer.write(self.distance)?;
        writer.write(self.naps)
    }

    fn deserialize(&mut self, reader: &mut ByteStreamReader<'_>) -> Result<(), StreamError> {
        reader.read_into(&mut self.health)?;
        reader.read_into(&mut self.meow_count)?;
        reader.read_array_into(&mut self.name)?;
        reader.read_into(&mut self.is_awake)?;
        reader.read_into(&mut self.distance)?;
        reader.read_into(&mut self.naps)
    }
}

impl BitSerializable for RoboCat {
    fn serialize_bits(&self, writer: &mut BitStreamWriter) -> Result<(), StreamError> {
        writer.write_bool(self.is_awake)?;
        writer.write_bits(self.health, HEALTH_BITS)?;
        writer.write_bits(self.meow_count, MEOW_COUNT_BITS)?;
        writer.write_array(&self.name)?;
        writer.write(self.naps)?;
        writer.write(self.distance)
    }

    fn deserialize_bits(&mut self, reader: &mut BitStreamReader<'_>) -> Result<(), StreamError> {
        self.is_awake = reader.read_bool()?;
        self.health = reader.read_signed(HEALTH_BITS)?;
        self.meow_count = reader.read_signed(MEOW_COUNT_BITS)?;
        reader.read_array_into(&mut self.name)?;
        reader.read_into(&mut self.naps, u32::BITS)?;
        reader.read_into(&mut self.distance, u64::BITS)
    }
}
