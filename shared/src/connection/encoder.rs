// Outbound frame construction: fixed-width big-endian header, u8
// length-prefixed payload, the whole frame base64-encoded for the text-only
// channel. The decoder in `decoder.rs` is the exact mirror; the two must
// round-trip byte-for-byte because the channel is the only source of truth
// between independently-executing clients.

use heliograph_serde::{to_transport_text, ByteWriter};

use crate::{
    connection::{error::EncoderError, packet_type::PacketType},
    constants::{CHUNK_PAYLOAD_LIMIT, MAX_FRAME_CHARS, SINGLE_PAYLOAD_LIMIT, STRING_PREFIX_BYTES},
    types::RequestId,
};

/// Builds the frame for a payload that fits in a single packet.
pub fn encode_single_packet(
    request_id: RequestId,
    payload: &[u8],
) -> Result<String, EncoderError> {
    if payload.len() > SINGLE_PAYLOAD_LIMIT {
        return Err(EncoderError::PayloadTooLarge {
            size: payload.len(),
            limit: SINGLE_PAYLOAD_LIMIT,
        });
    }

    let mut writer = writer_for(PacketType::Single, payload.len());
    writer.write_u16(request_id);
    finish(writer, payload)
}

/// Builds the frame for one fragment of a chunked transfer.
///
/// `chunk_count` is the index of the transfer's final fragment; every
/// fragment of a transfer carries the same `request_id` and `chunk_count`.
pub fn encode_chunk_packet(
    request_id: RequestId,
    chunk_count: u16,
    chunk_index: u16,
    payload: &[u8],
) -> Result<String, EncoderError> {
    if payload.len() > CHUNK_PAYLOAD_LIMIT {
        return Err(EncoderError::PayloadTooLarge {
            size: payload.len(),
            limit: CHUNK_PAYLOAD_LIMIT,
        });
    }

    let mut writer = writer_for(PacketType::Chunk, payload.len());
    writer.write_u16(request_id);
    writer.write_u16(chunk_count);
    writer.write_u16(chunk_index);
    finish(writer, payload)
}

fn writer_for(packet_type: PacketType, payload_len: usize) -> ByteWriter {
    ByteWriter::with_capacity(packet_type.header_bytes() + STRING_PREFIX_BYTES + payload_len)
}

fn finish(mut writer: ByteWriter, payload: &[u8]) -> Result<String, EncoderError> {
    // payload <= 186 < 255, so the length prefix always fits
    writer
        .write_string(payload)
        .map_err(|_| EncoderError::PayloadTooLarge {
            size: payload.len(),
            limit: heliograph_serde::MAX_STRING_BYTES,
        })?;

    let frame = to_transport_text(&writer.to_bytes());
    if frame.len() > MAX_FRAME_CHARS {
        return Err(EncoderError::FrameOverflow {
            chars: frame.len(),
            max: MAX_FRAME_CHARS,
        });
    }
    Ok(frame)
}
