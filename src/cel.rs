//! Cel pixel decoding
//!
//! Turns a cel chunk's raw payload into an RGBA pixel block. Decoding
//! never fails: corrupt or unsupported cels degrade into warnings and
//! contribute nothing (or a partial block) to the composite, so one bad
//! cel cannot abort a whole conversion.

use crate::compress;
use crate::cursor::Cursor;
use crate::document::{Cel, Warning, CEL_COMPRESSED, CEL_LINKED, CEL_RAW};

/// A decoded block of cel pixels.
///
/// `rgba` is row-major, 4 bytes per pixel, always exactly
/// `width * height * 4` bytes; short source data is padded with
/// transparent pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CelPixels {
    pub width: u16,
    pub height: u16,
    pub rgba: Vec<u8>,
}

/// Decode a cel's pixel payload.
///
/// Returns the pixel block (or `None` when the cel contributes
/// nothing) plus any warnings raised along the way:
///
/// - raw cels (type 0) with fewer bytes than `width * height * 4`
///   keep what is available and warn
/// - compressed cels (type 2) that fail to inflate substitute a fully
///   transparent block and warn
/// - linked cels (type 1) are unsupported and contribute nothing
/// - unknown cel types contribute nothing
pub fn decode_pixels(cel: &Cel) -> (Option<CelPixels>, Vec<Warning>) {
    let mut warnings = Vec::new();
    let mut cursor = Cursor::new(&cel.payload);

    match cel.cel_type {
        CEL_RAW => {
            let (width, height) = match read_dimensions(&mut cursor) {
                Some(dims) => dims,
                None => {
                    warnings.push(Warning::new(format!(
                        "cel on layer {}: payload too short for cel dimensions, skipping",
                        cel.layer_index
                    )));
                    return (None, warnings);
                }
            };
            let expected = usize::from(width) * usize::from(height) * 4;
            let available = cursor.remaining();
            let mut rgba = vec![0u8; expected];
            let copied = available.min(expected);
            if let Ok(bytes) = cursor.read_bytes(copied) {
                rgba[..copied].copy_from_slice(bytes);
            }
            if available < expected {
                warnings.push(Warning::new(format!(
                    "cel on layer {}: raw pixel data truncated ({} of {} bytes), \
                     remainder left transparent",
                    cel.layer_index, available, expected
                )));
            }
            (
                Some(CelPixels {
                    width,
                    height,
                    rgba,
                }),
                warnings,
            )
        }
        CEL_COMPRESSED => {
            let (width, height) = match read_dimensions(&mut cursor) {
                Some(dims) => dims,
                None => {
                    warnings.push(Warning::new(format!(
                        "cel on layer {}: payload too short for cel dimensions, skipping",
                        cel.layer_index
                    )));
                    return (None, warnings);
                }
            };
            let expected = usize::from(width) * usize::from(height) * 4;
            let rest = cursor.remaining();
            let compressed = cursor.read_bytes(rest).unwrap_or(&[]);
            let mut rgba = vec![0u8; expected];
            match compress::inflate(compressed) {
                Ok(decoded) => {
                    if decoded.len() < expected {
                        warnings.push(Warning::new(format!(
                            "cel on layer {}: decompressed pixel data truncated \
                             ({} of {} bytes), remainder left transparent",
                            cel.layer_index,
                            decoded.len(),
                            expected
                        )));
                    }
                    let copied = decoded.len().min(expected);
                    rgba[..copied].copy_from_slice(&decoded[..copied]);
                }
                Err(err) => {
                    warnings.push(Warning::new(format!(
                        "cel on layer {}: failed to decompress pixel data ({}), \
                         substituting transparent pixels",
                        cel.layer_index, err
                    )));
                }
            }
            (
                Some(CelPixels {
                    width,
                    height,
                    rgba,
                }),
                warnings,
            )
        }
        CEL_LINKED => {
            warnings.push(Warning::new(format!(
                "cel on layer {}: linked cels are not supported, skipping",
                cel.layer_index
            )));
            (None, warnings)
        }
        other => {
            warnings.push(Warning::new(format!(
                "cel on layer {}: unknown cel type {}, skipping",
                cel.layer_index, other
            )));
            (None, warnings)
        }
    }
}

fn read_dimensions(cursor: &mut Cursor) -> Option<(u16, u16)> {
    let width = cursor.read_u16().ok()?;
    let height = cursor.read_u16().ok()?;
    Some((width, height))
}
