//! Conversion pipeline
//!
//! Ties the stages together: parse the document down to the requested
//! frame, composite its cels, optionally upscale, and encode the result
//! as PNG. Each conversion is a stateless one-shot transformation.

use std::io;

use image::RgbaImage;

use crate::compositor::composite_frame;
use crate::document::{parse_document, DecodeError, Warning};
use crate::output::scale_image;
use crate::png;

/// Error type for a failed conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The document could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// PNG serialization failed.
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] io::Error),
}

/// Result of a successful conversion: the PNG bytes plus any warnings
/// accumulated while decoding degraded cels.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub png: Vec<u8>,
    pub warnings: Vec<Warning>,
}

/// Decode one frame of an Aseprite document into an RGBA canvas.
pub fn decode_frame(
    data: &[u8],
    frame_index: usize,
) -> Result<(RgbaImage, Vec<Warning>), DecodeError> {
    let frame = parse_document(data, frame_index)?;
    Ok(composite_frame(&frame))
}

/// Convert one frame of an Aseprite document to PNG bytes.
///
/// `scale` applies nearest-neighbor integer upscaling after
/// compositing; 1 leaves the canvas untouched.
pub fn convert(data: &[u8], frame_index: usize, scale: u8) -> Result<Conversion, ConvertError> {
    let (canvas, warnings) = decode_frame(data, frame_index)?;
    let canvas = scale_image(canvas, scale);
    let png = png::encode(&canvas)?;
    Ok(Conversion { png, warnings })
}
