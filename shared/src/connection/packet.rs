use crate::{connection::packet_type::PacketType, types::RequestId};

/// A decoded inbound frame. Transient: lives only for the duration of one
/// receive call, long enough to be routed to its request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub request_id: RequestId,
    /// Position of this fragment within the transfer. 0 for unchunked frames.
    pub chunk_index: u16,
    /// Index of the transfer's final fragment: a chunked transfer carries
    /// `chunk_count + 1` fragments. 0 for unchunked frames.
    pub chunk_count: u16,
    pub payload: Vec<u8>,
}

impl Packet {
    /// Total fragments the transfer consists of.
    pub fn fragment_total(&self) -> usize {
        self.chunk_count as usize + 1
    }

    pub fn packet_type(&self) -> PacketType {
        if self.chunk_count == 0 && self.chunk_index == 0 {
            PacketType::Single
        } else {
            PacketType::Chunk
        }
    }
}
