//! Asepng - Library for converting Aseprite documents to PNG
//!
//! This library provides functionality to:
//! - Parse `.aseprite`/`.ase` documents (32-bit RGBA)
//! - Composite one frame's cels into an RGBA canvas
//! - Encode the result as a minimal, spec-conformant PNG

pub mod cel;
pub mod cli;
pub mod compositor;
pub mod compress;
pub mod convert;
pub mod crc32;
pub mod cursor;
pub mod document;
pub mod output;
pub mod png;
