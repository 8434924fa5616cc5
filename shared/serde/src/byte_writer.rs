use crate::{error::SerdeErr, MAX_STRING_BYTES};

/// Packs fixed-width values into a growable byte buffer.
///
/// All multi-byte values are written big-endian, so the bytes on the wire are
/// identical no matter which client produced them.
pub struct ByteWriter {
    buffer: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.buffer.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buffer.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i16(&mut self, value: i16) {
        self.buffer.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buffer.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_f32(&mut self, value: f32) {
        self.buffer.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.buffer.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Writes a byte string as a u8 length prefix followed by the bytes.
    ///
    /// Payloads are binary and may contain NUL, which rules out C-string
    /// termination; the explicit prefix caps strings at [`MAX_STRING_BYTES`].
    pub fn write_string(&mut self, string: &[u8]) -> Result<(), SerdeErr> {
        if string.len() > MAX_STRING_BYTES {
            return Err(SerdeErr::StringTooLong {
                length: string.len(),
                max: MAX_STRING_BYTES,
            });
        }
        self.buffer.push(string.len() as u8);
        self.buffer.extend_from_slice(string);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn to_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

impl Default for ByteWriter {
    fn default() -> Self {
        Self::new()
    }
}
