// The channel delivers a one-character prefix tag out-of-band with every
// frame; it is the only routing information the engine gives us, so it
// distinguishes the two frame layouts.

use crate::{
    connection::error::DecoderError,
    constants::{CHUNK_HEADER_BYTES, SINGLE_HEADER_BYTES},
};

/// Prefix tag for an unchunked frame (payload fit in a single packet).
pub const SINGLE_PREFIX: char = 'T';

/// Prefix tag for one fragment of a chunked transfer.
pub const CHUNK_PREFIX: char = 'S';

#[derive(Copy, Debug, Clone, Eq, PartialEq)]
pub enum PacketType {
    /// The whole payload in one frame: header is just the request id.
    Single,
    /// One fragment of a larger payload: header carries request id,
    /// chunk count, and chunk index.
    Chunk,
}

impl PacketType {
    pub fn prefix(&self) -> char {
        match self {
            PacketType::Single => SINGLE_PREFIX,
            PacketType::Chunk => CHUNK_PREFIX,
        }
    }

    /// Maps a channel prefix back to a frame layout. Unknown prefixes are an
    /// error: a frame on an unrecognized tag cannot be parsed safely.
    pub fn from_prefix(prefix: char) -> Result<Self, DecoderError> {
        match prefix {
            SINGLE_PREFIX => Ok(PacketType::Single),
            CHUNK_PREFIX => Ok(PacketType::Chunk),
            _ => Err(DecoderError::UnknownPrefix { prefix }),
        }
    }

    pub fn header_bytes(&self) -> usize {
        match self {
            PacketType::Single => SINGLE_HEADER_BYTES,
            PacketType::Chunk => CHUNK_HEADER_BYTES,
        }
    }
}
