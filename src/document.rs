//! Aseprite document parsing
//!
//! Reads the 128-byte file header and walks the per-frame chunk
//! streams. Only LAYER and CEL chunks are decoded into structured
//! values; every other chunk kind is kept as an unparsed payload so the
//! stream offsets stay consistent.
//!
//! Format reference: the .ase/.aseprite file specs published with
//! Aseprite itself.

use serde::Serialize;

use crate::cursor::{Cursor, TruncatedData};

/// Magic number identifying an Aseprite document header.
pub const FILE_MAGIC: u16 = 0xA5E0;

/// Magic number at the start of every frame header.
pub const FRAME_MAGIC: u16 = 0xF1FA;

/// Total byte size of the document header, including reserved space.
pub const HEADER_SIZE: usize = 128;

/// Byte size of the (size, type) prefix included in every chunk's
/// declared size.
const CHUNK_HEADER_SIZE: u32 = 6;

/// A warning generated while decoding a document.
///
/// Warnings mark places where the input was degraded but conversion
/// could continue with best-effort output. They are returned to the
/// caller rather than printed, so the CLI decides how to surface them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub message: String,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error type for document decoding failures.
///
/// Everything here is fatal: the document is rejected and no output is
/// produced. Recoverable conditions surface as [`Warning`]s instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The document magic number did not match.
    #[error("not an Aseprite file (magic number 0x{found:04X}, expected 0xA5E0)")]
    InvalidMagic { found: u16 },

    /// Color depth other than 32-bit RGBA.
    #[error("unsupported color depth {0} (only 32-bit RGBA documents are supported)")]
    UnsupportedColorDepth(u16),

    /// Zero-sized canvas.
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvasSize { width: u16, height: u16 },

    /// A frame header carried the wrong magic sentinel.
    #[error("frame {index}: bad frame magic 0x{found:04X}, expected 0xF1FA")]
    InvalidFrameMagic { index: usize, found: u16 },

    /// A chunk declared a size smaller than its own header.
    #[error("frame {frame}: chunk size {size} is smaller than the chunk header")]
    InvalidChunkSize { frame: usize, size: u32 },

    /// The requested frame does not exist in the document.
    #[error("frame index {requested} out of range (document has {available} frame(s))")]
    FrameOutOfRange { requested: usize, available: u16 },

    /// The buffer ended in the middle of a structure.
    #[error(transparent)]
    Truncated(#[from] TruncatedData),
}

/// Decoded document header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHeader {
    pub file_size: u32,
    pub frame_count: u16,
    pub width: u16,
    pub height: u16,
    /// Bits per pixel: 32 (RGBA), 16 (grayscale) or 8 (indexed).
    /// Only 32 survives parsing.
    pub color_depth: u16,
    pub flags: u32,
    /// Legacy frame speed in ms; superseded by per-frame durations.
    pub speed: u16,
    pub transparent_index: u8,
    pub palette_size: u16,
    pub pixel_width: u8,
    pub pixel_height: u8,
    pub grid_x: i16,
    pub grid_y: i16,
    pub grid_width: u16,
    pub grid_height: u16,
}

/// Chunk type tags from the Aseprite format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    /// Legacy palette chunk (tag 0x0004)
    OldPalette04,
    /// Legacy palette chunk (tag 0x0011)
    OldPalette11,
    Layer,
    Cel,
    CelExtra,
    ColorProfile,
    Mask,
    Path,
    Tags,
    Palette,
    UserData,
    Slice,
    Tileset,
    /// Any tag this parser does not know about
    Unknown(u16),
}

impl ChunkKind {
    /// Map a raw chunk type tag to its kind.
    pub fn from_tag(tag: u16) -> Self {
        match tag {
            0x0004 => ChunkKind::OldPalette04,
            0x0011 => ChunkKind::OldPalette11,
            0x2004 => ChunkKind::Layer,
            0x2005 => ChunkKind::Cel,
            0x2006 => ChunkKind::CelExtra,
            0x2007 => ChunkKind::ColorProfile,
            0x2016 => ChunkKind::Mask,
            0x2017 => ChunkKind::Path,
            0x2018 => ChunkKind::Tags,
            0x2019 => ChunkKind::Palette,
            0x2020 => ChunkKind::UserData,
            0x2022 => ChunkKind::Slice,
            0x2023 => ChunkKind::Tileset,
            other => ChunkKind::Unknown(other),
        }
    }
}

/// A layer definition.
///
/// Layer identity is positional: the Nth layer chunk encountered while
/// walking the document is layer index N, which is how cels reference
/// their layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub flags: u16,
    pub layer_type: u16,
    pub child_level: u16,
    pub blend_mode: u16,
    pub opacity: u8,
    pub name: String,
}

impl Layer {
    /// Flags bit 0: layer is visible.
    pub fn is_visible(&self) -> bool {
        self.flags & 1 != 0
    }
}

/// A cel: one layer's pixel content within one frame.
///
/// The pixel payload is kept raw here; [`crate::cel`] decodes it per
/// cel type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cel {
    pub layer_index: u16,
    pub x: i16,
    pub y: i16,
    pub opacity: u8,
    pub cel_type: u16,
    /// Payload bytes after the fixed cel fields (dimensions + pixels)
    pub payload: Vec<u8>,
}

/// Cel type tag: uncompressed RGBA pixels.
pub const CEL_RAW: u16 = 0;
/// Cel type tag: reference to another frame's cel.
pub const CEL_LINKED: u16 = 1;
/// Cel type tag: DEFLATE-compressed RGBA pixels.
pub const CEL_COMPRESSED: u16 = 2;

/// One decoded chunk from a frame's stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    Layer(Layer),
    Cel(Cel),
    /// Chunk kinds outside the converter's scope, carried only so the
    /// stream walk stays aligned.
    Unparsed { kind: ChunkKind, data: Vec<u8> },
}

/// Everything needed to composite one frame: the document header, the
/// layer table, and the target frame's cels in file (draw) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFrame {
    pub header: DocumentHeader,
    pub duration_ms: u16,
    pub layers: Vec<Layer>,
    pub cels: Vec<Cel>,
}

struct FrameHeader {
    bytes: u32,
    duration_ms: u16,
    chunk_count: u32,
}

/// Parse the 128-byte document header, leaving the cursor at the first
/// frame.
pub fn parse_header(cursor: &mut Cursor) -> Result<DocumentHeader, DecodeError> {
    let start = cursor.position();
    let file_size = cursor.read_u32()?;
    let magic = cursor.read_u16()?;
    if magic != FILE_MAGIC {
        return Err(DecodeError::InvalidMagic { found: magic });
    }
    let frame_count = cursor.read_u16()?;
    let width = cursor.read_u16()?;
    let height = cursor.read_u16()?;
    let color_depth = cursor.read_u16()?;
    if color_depth != 32 {
        return Err(DecodeError::UnsupportedColorDepth(color_depth));
    }
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidCanvasSize { width, height });
    }
    let flags = cursor.read_u32()?;
    let speed = cursor.read_u16()?;
    cursor.skip(8)?; // two reserved dwords
    let transparent_index = cursor.read_u8()?;
    cursor.skip(3)?;
    let palette_size = cursor.read_u16()?;
    let pixel_width = cursor.read_u8()?;
    let pixel_height = cursor.read_u8()?;
    let grid_x = cursor.read_i16()?;
    let grid_y = cursor.read_i16()?;
    let grid_width = cursor.read_u16()?;
    let grid_height = cursor.read_u16()?;

    // The rest of the 128 bytes is reserved
    let consumed = cursor.position() - start;
    cursor.skip(HEADER_SIZE - consumed)?;

    Ok(DocumentHeader {
        file_size,
        frame_count,
        width,
        height,
        color_depth,
        flags,
        speed,
        transparent_index,
        palette_size,
        pixel_width,
        pixel_height,
        grid_x,
        grid_y,
        grid_width,
        grid_height,
    })
}

fn parse_frame_header(cursor: &mut Cursor, index: usize) -> Result<FrameHeader, DecodeError> {
    let bytes = cursor.read_u32()?;
    let magic = cursor.read_u16()?;
    if magic != FRAME_MAGIC {
        return Err(DecodeError::InvalidFrameMagic {
            index,
            found: magic,
        });
    }
    let legacy_chunk_count = cursor.read_u16()?;
    let duration_ms = cursor.read_u16()?;
    cursor.skip(2)?;
    let modern_chunk_count = cursor.read_u32()?;

    // Use the modern 32-bit count when nonzero, else the legacy 16-bit
    // count (which saturates at 0xFFFF).
    let chunk_count = if modern_chunk_count != 0 {
        modern_chunk_count
    } else {
        u32::from(legacy_chunk_count)
    };

    Ok(FrameHeader {
        bytes,
        duration_ms,
        chunk_count,
    })
}

/// Parse one chunk at the cursor.
pub fn parse_chunk(cursor: &mut Cursor, frame: usize) -> Result<Chunk, DecodeError> {
    let size = cursor.read_u32()?;
    let tag = cursor.read_u16()?;
    if size < CHUNK_HEADER_SIZE {
        return Err(DecodeError::InvalidChunkSize { frame, size });
    }
    let payload = cursor.read_bytes((size - CHUNK_HEADER_SIZE) as usize)?;

    match ChunkKind::from_tag(tag) {
        ChunkKind::Layer => Ok(Chunk::Layer(parse_layer(&mut Cursor::new(payload))?)),
        ChunkKind::Cel => Ok(Chunk::Cel(parse_cel(&mut Cursor::new(payload))?)),
        kind => Ok(Chunk::Unparsed {
            kind,
            data: payload.to_vec(),
        }),
    }
}

fn parse_layer(cursor: &mut Cursor) -> Result<Layer, DecodeError> {
    let flags = cursor.read_u16()?;
    let layer_type = cursor.read_u16()?;
    let child_level = cursor.read_u16()?;
    cursor.skip(4)?; // default width/height, informational only
    let blend_mode = cursor.read_u16()?;
    let opacity = cursor.read_u8()?;
    cursor.skip(3)?;
    let name = cursor.read_string()?;
    Ok(Layer {
        flags,
        layer_type,
        child_level,
        blend_mode,
        opacity,
        name,
    })
}

fn parse_cel(cursor: &mut Cursor) -> Result<Cel, DecodeError> {
    let layer_index = cursor.read_u16()?;
    let x = cursor.read_i16()?;
    let y = cursor.read_i16()?;
    let opacity = cursor.read_u8()?;
    let cel_type = cursor.read_u16()?;
    cursor.skip(7)?; // z-index + reserved
    let rest = cursor.remaining();
    let payload = cursor.read_bytes(rest)?.to_vec();
    Ok(Cel {
        layer_index,
        x,
        y,
        opacity,
        cel_type,
        payload,
    })
}

/// Parse a document down to the requested frame.
///
/// Layer chunks are accumulated from every frame walked (real documents
/// store the layer table in frame 0); cels are taken from the target
/// frame only. Frames past the target are never parsed.
pub fn parse_document(data: &[u8], frame_index: usize) -> Result<TargetFrame, DecodeError> {
    let mut cursor = Cursor::new(data);
    let header = parse_header(&mut cursor)?;

    if frame_index >= usize::from(header.frame_count) {
        return Err(DecodeError::FrameOutOfRange {
            requested: frame_index,
            available: header.frame_count,
        });
    }

    let mut layers = Vec::new();
    let mut duration_ms = header.speed;
    let mut cels = Vec::new();

    for index in 0..=frame_index {
        let frame_start = cursor.position();
        let frame_header = parse_frame_header(&mut cursor, index)?;

        for _ in 0..frame_header.chunk_count {
            match parse_chunk(&mut cursor, index)? {
                Chunk::Layer(layer) => layers.push(layer),
                Chunk::Cel(cel) => {
                    if index == frame_index {
                        cels.push(cel);
                    }
                }
                Chunk::Unparsed { .. } => {}
            }
        }

        if index == frame_index {
            duration_ms = frame_header.duration_ms;
        } else {
            // Trust the declared frame length for the next frame offset
            cursor.set_position(frame_start + frame_header.bytes as usize);
        }
    }

    Ok(TargetFrame {
        header,
        duration_ms,
        layers,
        cels,
    })
}

/// Document metadata for the `info` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentInfo {
    pub width: u16,
    pub height: u16,
    pub color_depth: u16,
    pub frame_count: u16,
    pub frames: Vec<FrameInfo>,
    pub layers: Vec<LayerInfo>,
}

/// Per-frame metadata for the `info` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameInfo {
    pub index: usize,
    pub duration_ms: u16,
    pub chunks: u32,
}

/// Per-layer metadata for the `info` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerInfo {
    pub name: String,
    pub visible: bool,
    pub opacity: u8,
}

/// Walk every frame of a document and summarize its structure.
///
/// Only data the converter already understands is reported: the header,
/// frame headers, and layer chunks. Nothing else is semantically
/// decoded.
pub fn document_info(data: &[u8]) -> Result<DocumentInfo, DecodeError> {
    let mut cursor = Cursor::new(data);
    let header = parse_header(&mut cursor)?;

    let mut frames = Vec::with_capacity(usize::from(header.frame_count));
    let mut layers = Vec::new();

    for index in 0..usize::from(header.frame_count) {
        let frame_start = cursor.position();
        let frame_header = parse_frame_header(&mut cursor, index)?;

        for _ in 0..frame_header.chunk_count {
            if let Chunk::Layer(layer) = parse_chunk(&mut cursor, index)? {
                layers.push(LayerInfo {
                    visible: layer.is_visible(),
                    opacity: layer.opacity,
                    name: layer.name,
                });
            }
        }

        frames.push(FrameInfo {
            index,
            duration_ms: frame_header.duration_ms,
            chunks: frame_header.chunk_count,
        });

        cursor.set_position(frame_start + frame_header.bytes as usize);
    }

    Ok(DocumentInfo {
        width: header.width,
        height: header.height,
        color_depth: header.color_depth,
        frame_count: header.frame_count,
        frames,
        layers,
    })
}
