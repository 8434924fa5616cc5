//! # Heliograph Shared
//! Reliable delivery of small binary payloads from one game client to every
//! other client in a session, over a host engine's one-way, text-only,
//! size-limited broadcast primitive.
//!
//! The engine channel gives us almost nothing: one short string per send,
//! no framing, no addressing, no delivery report beyond a boolean. This
//! crate layers request correlation, chunking, reassembly, and timeout
//! handling on top of it. See `SyncManager` for the entry point.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use heliograph_serde::{
    from_transport_text, to_transport_text, ByteReader, ByteWriter, SerdeErr, MAX_STRING_BYTES,
};

mod connection;
mod constants;
mod key_generator;
mod messages;
mod transport;
mod types;

pub use connection::{
    decoder::decode_packet,
    encoder::{encode_chunk_packet, encode_single_packet},
    error::{DecoderError, EncoderError},
    packet::Packet,
    packet_type::{PacketType, CHUNK_PREFIX, SINGLE_PREFIX},
};
pub use constants::{
    CHUNK_PAYLOAD_LIMIT, FRAME_BYTE_BUDGET, MAX_FRAGMENTS, MAX_FRAME_CHARS, MAX_SYNC_PAYLOAD,
    SINGLE_PAYLOAD_LIMIT,
};
pub use key_generator::{KeyGenerator, KeyGeneratorError};
pub use messages::{
    chunker::{fragment_count, fragments},
    error::SyncError,
    sync_manager::{SyncConfig, SyncManager, SyncOptions},
    sync_request::{SyncResponse, SyncRole, SyncStatus},
};
pub use transport::BroadcastTransport;
pub use types::{GameTime, ParticipantId, RequestId};
