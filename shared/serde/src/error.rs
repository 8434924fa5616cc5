use thiserror::Error;

/// Errors that can occur while packing or unpacking wire data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// Reader ran out of bytes mid-value
    #[error("buffer exhausted: needed {needed} more bytes, {remaining} remaining")]
    BufferExhausted { needed: usize, remaining: usize },

    /// Byte string is too long for its u8 length prefix
    #[error("string of {length} bytes exceeds the {max}-byte length prefix")]
    StringTooLong { length: usize, max: usize },

    /// Transport text was not valid base64
    #[error("transport text is not valid base64")]
    InvalidTextEncoding,
}
