//! Minimal PNG encoder
//!
//! Serializes an RGBA buffer into a spec-conformant PNG byte stream:
//! the 8-byte signature, an IHDR chunk (8-bit RGBA, no interlace), a
//! single zlib-compressed IDAT chunk of filter-type-0 scanlines, and an
//! empty IEND chunk. No ancillary chunks are written.

use std::io;

use image::RgbaImage;

use crate::compress;
use crate::crc32::crc32;

/// The fixed 8-byte PNG signature.
pub const SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// PNG color type 6: truecolor with alpha.
const COLOR_TYPE_RGBA: u8 = 6;

/// Encode an RGBA image as a complete PNG byte stream.
///
/// The only failure mode is the DEFLATE step reporting an I/O error,
/// which for in-memory buffers does not happen in practice but is
/// propagated rather than swallowed.
pub fn encode(image: &RgbaImage) -> io::Result<Vec<u8>> {
    let width = image.width();
    let height = image.height();

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.push(8); // bit depth
    ihdr.push(COLOR_TYPE_RGBA);
    ihdr.push(0); // compression method
    ihdr.push(0); // filter method
    ihdr.push(0); // interlace method

    // Filter-type byte 0 (none) in front of every scanline
    let row_bytes = width as usize * 4;
    let raw = image.as_raw();
    let mut scanlines = Vec::with_capacity((row_bytes + 1) * height as usize);
    for row in 0..height as usize {
        scanlines.push(0);
        scanlines.extend_from_slice(&raw[row * row_bytes..(row + 1) * row_bytes]);
    }
    let idat = compress::deflate(&scanlines)?;

    let mut out = Vec::new();
    out.extend_from_slice(&SIGNATURE);
    write_chunk(&mut out, b"IHDR", &ihdr);
    write_chunk(&mut out, b"IDAT", &idat);
    write_chunk(&mut out, b"IEND", &[]);
    Ok(out)
}

/// Frame one chunk: big-endian data length, 4-byte ASCII type, data,
/// then CRC-32 over type + data.
fn write_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);

    let mut checked = Vec::with_capacity(4 + data.len());
    checked.extend_from_slice(kind);
    checked.extend_from_slice(data);
    out.extend_from_slice(&crc32(&checked).to_be_bytes());
}
