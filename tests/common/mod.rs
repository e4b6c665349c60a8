//! Synthetic Aseprite document builders shared by the integration tests.

#![allow(dead_code)]

/// Build a 128-byte document header.
pub fn header(width: u16, height: u16, frames: u16, depth: u16) -> Vec<u8> {
    let mut out = Vec::with_capacity(128);
    out.extend_from_slice(&0u32.to_le_bytes()); // file size, unchecked
    out.extend_from_slice(&0xA5E0u16.to_le_bytes());
    out.extend_from_slice(&frames.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&depth.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // flags
    out.extend_from_slice(&100u16.to_le_bytes()); // legacy speed
    out.extend_from_slice(&[0u8; 8]); // reserved
    out.push(0); // transparent index
    out.extend_from_slice(&[0u8; 3]);
    out.extend_from_slice(&0u16.to_le_bytes()); // palette size
    out.push(1); // pixel width
    out.push(1); // pixel height
    out.extend_from_slice(&0i16.to_le_bytes()); // grid x
    out.extend_from_slice(&0i16.to_le_bytes()); // grid y
    out.extend_from_slice(&16u16.to_le_bytes()); // grid width
    out.extend_from_slice(&16u16.to_le_bytes()); // grid height
    out.resize(128, 0);
    out
}

/// Frame with the given chunks and the modern chunk count populated.
pub fn frame(duration_ms: u16, chunks: &[Vec<u8>]) -> Vec<u8> {
    let chunk_bytes: usize = chunks.iter().map(Vec::len).sum();
    let mut out = Vec::new();
    out.extend_from_slice(&((16 + chunk_bytes) as u32).to_le_bytes());
    out.extend_from_slice(&0xF1FAu16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // legacy chunk count
    out.extend_from_slice(&duration_ms.to_le_bytes());
    out.extend_from_slice(&[0u8; 2]);
    out.extend_from_slice(&(chunks.len() as u32).to_le_bytes());
    for chunk in chunks {
        out.extend_from_slice(chunk);
    }
    out
}

fn chunk(tag: u16, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&((payload.len() + 6) as u32).to_le_bytes());
    out.extend_from_slice(&tag.to_le_bytes());
    out.extend_from_slice(payload);
    out
}

pub fn layer_chunk(flags: u16, opacity: u8, name: &str) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.extend_from_slice(&flags.to_le_bytes());
    payload.extend_from_slice(&0u16.to_le_bytes()); // layer type
    payload.extend_from_slice(&0u16.to_le_bytes()); // child level
    payload.extend_from_slice(&[0u8; 4]); // default width/height
    payload.extend_from_slice(&0u16.to_le_bytes()); // blend mode
    payload.push(opacity);
    payload.extend_from_slice(&[0u8; 3]);
    payload.extend_from_slice(&(name.len() as u16).to_le_bytes());
    payload.extend_from_slice(name.as_bytes());
    chunk(0x2004, &payload)
}

fn cel_fields(layer: u16, x: i16, y: i16, opacity: u8, cel_type: u16) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.extend_from_slice(&layer.to_le_bytes());
    payload.extend_from_slice(&x.to_le_bytes());
    payload.extend_from_slice(&y.to_le_bytes());
    payload.push(opacity);
    payload.extend_from_slice(&cel_type.to_le_bytes());
    payload.extend_from_slice(&[0u8; 7]); // z-index + reserved
    payload
}

pub fn cel_chunk_raw(
    layer: u16,
    x: i16,
    y: i16,
    opacity: u8,
    width: u16,
    height: u16,
    rgba: &[u8],
) -> Vec<u8> {
    let mut payload = cel_fields(layer, x, y, opacity, 0);
    payload.extend_from_slice(&width.to_le_bytes());
    payload.extend_from_slice(&height.to_le_bytes());
    payload.extend_from_slice(rgba);
    chunk(0x2005, &payload)
}

pub fn cel_chunk_linked(layer: u16, frame: u16) -> Vec<u8> {
    let mut payload = cel_fields(layer, 0, 0, 255, 1);
    payload.extend_from_slice(&frame.to_le_bytes());
    chunk(0x2005, &payload)
}

/// Assemble a whole document from a header and frame blobs.
pub fn document(header_bytes: Vec<u8>, frames: &[Vec<u8>]) -> Vec<u8> {
    let mut out = header_bytes;
    for frame in frames {
        out.extend_from_slice(frame);
    }
    out
}

/// A single-frame, single-layer document with one raw cel covering the
/// whole canvas.
pub fn simple_document(width: u16, height: u16, rgba: &[u8]) -> Vec<u8> {
    let frame = frame(
        100,
        &[
            layer_chunk(1, 255, "Layer 1"),
            cel_chunk_raw(0, 0, 0, 255, width, height, rgba),
        ],
    );
    document(header(width, height, 1, 32), &[frame])
}
