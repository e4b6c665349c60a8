//! DEFLATE compression helpers
//!
//! Thin byte-buffer wrappers over flate2, so the parser and the PNG
//! encoder only ever see `&[u8] -> Vec<u8>` transforms and never a
//! particular streaming API.

use std::io;
use std::io::{Read, Write};

use flate2::read::{DeflateDecoder, ZlibDecoder};
use flate2::write::ZlibEncoder;
use flate2::Compression;

/// Decompress a DEFLATE stream.
///
/// Aseprite cel payloads normally carry a zlib wrapper (2-byte header
/// starting 0x78 plus a trailing Adler-32 checksum); bare DEFLATE data
/// is accepted as well by sniffing the lead byte.
pub fn inflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut output = Vec::new();
    if data.first() == Some(&0x78) {
        ZlibDecoder::new(data).read_to_end(&mut output)?;
    } else {
        DeflateDecoder::new(data).read_to_end(&mut output)?;
    }
    Ok(output)
}

/// Compress bytes into a zlib-wrapped DEFLATE stream, as required for
/// the PNG IDAT chunk.
pub fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
