//! Simulated network replication of an entity.
//!
//! A round trip serializes a staging copy of the source, wipes that copy, and
//! rebuilds the destination from nothing but the serialized bytes. If the
//! destination ends up equal to the source, its state cannot have come from
//! shared memory.

use std::any::type_name;

use crate::{
    bit_stream::{BitStreamReader, BitStreamWriter},
    byte_stream::{ByteStreamReader, ByteStreamWriter},
    config::StreamConfig,
    entity::{BitSerializable, Serializable},
    errors::ReplicationError,
};

/// Sizes observed during one round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplicationReport {
    /// Bits produced by the serializer.
    pub transmitted_bits: usize,
    /// Bytes that would go on the wire.
    pub transmitted_bytes: usize,
    /// Bits the deserializer left unread. Non-zero usually means the two
    /// sides disagree on field order or width.
    pub unread_bits: usize,
}

/// Drives serialize, transmit and deserialize for any [Serializable] or
/// [BitSerializable] entity.
#[derive(Debug, Clone, Default)]
pub struct ReplicationSimulator {
    config: StreamConfig,
}

impl ReplicationSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StreamConfig) -> Result<Self, ReplicationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Replicates `source` into `destination` through a byte stream.
    pub fn simulate_replication<E>(
        &self,
        source: &E,
        destination: &mut E,
    ) -> Result<ReplicationReport, ReplicationError>
    where
        E: Serializable + Clone + Default,
    {
        let mut writer =
            ByteStreamWriter::with_config(&self.config).map_err(ReplicationError::Serialize)?;
        {
            let mut staging = source.clone();
            staging
                .serialize(&mut writer)
                .map_err(ReplicationError::Serialize)?;
            scrub(&mut staging);
        }

        let mut reader = ByteStreamReader::with_length(writer.as_bytes(), writer.len());
        destination
            .deserialize(&mut reader)
            .map_err(ReplicationError::Deserialize)?;

        let report = ReplicationReport {
            transmitted_bits: writer.len() * 8,
            transmitted_bytes: writer.len(),
            unread_bits: reader.remaining() * 8,
        };
        log_report::<E>("byte", &report);
        Ok(report)
    }

    /// Replicates `source` into `destination` through a bit stream.
    pub fn simulate_bit_replication<E>(
        &self,
        source: &E,
        destination: &mut E,
    ) -> Result<ReplicationReport, ReplicationError>
    where
        E: BitSerializable + Clone + Default,
    {
        let mut writer =
            BitStreamWriter::with_config(&self.config).map_err(ReplicationError::Serialize)?;
        {
            let mut staging = source.clone();
            staging
                .serialize_bits(&mut writer)
                .map_err(ReplicationError::Serialize)?;
            scrub(&mut staging);
        }

        let mut reader = BitStreamReader::with_bit_length(writer.as_bytes(), writer.bit_length());
        destination
            .deserialize_bits(&mut reader)
            .map_err(ReplicationError::Deserialize)?;

        let report = ReplicationReport {
            transmitted_bits: writer.bit_length(),
            transmitted_bytes: writer.byte_length(),
            unread_bits: reader.remaining_bits(),
        };
        log_report::<E>("bit", &report);
        Ok(report)
    }
}

// Overwrites the staging copy with the sentinel state before it is dropped.
fn scrub<E: Default>(staging: &mut E) {
    *staging = E::default();
}

fn log_report<E>(stream: &str, report: &ReplicationReport) {
    tracing::debug!(
        entity = type_name::<E>(),
        stream,
        bits = report.transmitted_bits,
        bytes = report.transmitted_bytes,
        "replicated entity"
    );

    if report.unread_bits != 0 {
        tracing::warn!(
            entity = type_name::<E>(),
            stream,
            unread_bits = report.unread_bits,
            "deserializer left data unread; field order may not match"
        );
    }
}
