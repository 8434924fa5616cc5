use crate::error::SerdeErr;

/// Encodes raw frame bytes into the text-safe form the broadcast channel
/// accepts. The channel transmits strings only; base64 keeps arbitrary bytes
/// (NUL included) intact across it.
pub fn to_transport_text(bytes: &[u8]) -> String {
    base64::encode(bytes)
}

/// Decodes a frame received off the channel back into raw bytes.
pub fn from_transport_text(text: &str) -> Result<Vec<u8>, SerdeErr> {
    base64::decode(text).map_err(|_| SerdeErr::InvalidTextEncoding)
}
