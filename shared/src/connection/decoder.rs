// Inbound frame parsing, the mirror of `encoder.rs`. Every failure is a
// typed, discardable error: frames cross machine boundaries, so malformed
// input must never panic the receiving client.

use heliograph_serde::{from_transport_text, ByteReader};

use crate::{
    connection::{error::DecoderError, packet::Packet, packet_type::PacketType},
    types::RequestId,
};

/// Parses a raw frame received off the channel, given the prefix tag the
/// channel delivered alongside it.
pub fn decode_packet(prefix: char, frame: &str) -> Result<Packet, DecoderError> {
    let packet_type = PacketType::from_prefix(prefix)?;
    let bytes = from_transport_text(frame)?;
    let mut reader = ByteReader::new(&bytes);

    let request_id: RequestId = reader.read_u16()?;
    let (chunk_count, chunk_index) = match packet_type {
        PacketType::Single => (0, 0),
        PacketType::Chunk => (reader.read_u16()?, reader.read_u16()?),
    };
    let payload = reader.read_string()?.to_vec();

    if !reader.is_empty() {
        return Err(DecoderError::TrailingBytes {
            count: reader.remaining(),
        });
    }

    Ok(Packet {
        request_id,
        chunk_index,
        chunk_count,
        payload,
    })
}
