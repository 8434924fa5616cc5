//! # Heliograph Serde
//! Byte-level serialization primitives consumed by the heliograph protocol:
//! big-endian fixed-width integer pack/unpack, length-prefixed byte strings,
//! and the text-safe encoding that lets binary frames survive a text-only
//! broadcast channel.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod byte_reader;
mod byte_writer;
mod error;
mod text;

pub use byte_reader::ByteReader;
pub use byte_writer::ByteWriter;
pub use error::SerdeErr;
pub use text::{from_transport_text, to_transport_text};

/// Longest byte string representable with the u8 length prefix used by
/// `ByteWriter::write_string` / `ByteReader::read_string`.
pub const MAX_STRING_BYTES: usize = u8::MAX as usize;
