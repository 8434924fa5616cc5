// Payload slicing for chunked transfers. Deterministic: the sender and the
// creation-time validation both rely on the same fragment math.

use crate::constants::CHUNK_PAYLOAD_LIMIT;

/// Number of fragments a payload of `payload_len` bytes splits into.
pub fn fragment_count(payload_len: usize) -> usize {
    payload_len.div_ceil(CHUNK_PAYLOAD_LIMIT)
}

/// Slices a payload into fragments of at most [`CHUNK_PAYLOAD_LIMIT`] bytes,
/// in index order. Concatenating the fragments reproduces the payload
/// byte-for-byte.
pub fn fragments(payload: &[u8]) -> impl Iterator<Item = &[u8]> {
    payload.chunks(CHUNK_PAYLOAD_LIMIT)
}
