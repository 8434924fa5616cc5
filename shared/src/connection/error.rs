use heliograph_serde::SerdeErr;
use thiserror::Error;

/// Errors that can occur while building an outbound frame
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncoderError {
    /// Payload exceeds the per-packet budget; the caller must pre-slice
    /// payloads into fragments that fit
    #[error("payload of {size} bytes exceeds the {limit}-byte per-packet limit; slice it into chunks first")]
    PayloadTooLarge { size: usize, limit: usize },

    /// Built frame would not fit under the channel's per-message ceiling
    #[error("encoded frame of {chars} characters exceeds the channel ceiling of {max}")]
    FrameOverflow { chars: usize, max: usize },
}

/// Errors that can occur while parsing an inbound frame.
///
/// Every variant is discardable: frames arrive from other clients over a
/// lossy channel, so the dispatch layer logs and drops malformed input
/// rather than surfacing it to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecoderError {
    /// Channel prefix does not name a known frame layout
    #[error("unknown channel prefix '{prefix}' (expected 'T' or 'S')")]
    UnknownPrefix { prefix: char },

    /// Frame text failed to unpack: bad transport encoding or a header or
    /// payload cut short
    #[error("malformed frame: {0}")]
    Malformed(#[from] SerdeErr),

    /// Bytes left over after the header and length-prefixed payload
    #[error("{count} trailing bytes after the payload; frame is malformed")]
    TrailingBytes { count: usize },
}
