//! Frame compositing
//!
//! Rasterizes a frame's cels onto a canvas-sized RGBA buffer in file
//! order (bottom-to-top), applying standard "over" alpha blending with
//! the combined layer and cel opacity. Hidden layers are skipped and
//! cel pixels falling outside the canvas are clipped.

use image::{Rgba, RgbaImage};

use crate::cel::{self, CelPixels};
use crate::document::{TargetFrame, Warning};

/// Composite all cels of a frame onto a fresh transparent canvas.
///
/// File order is authoritative for draw order: earlier cels end up
/// underneath later ones. A cel is skipped when its layer index does
/// not resolve or the layer's visible flag is clear.
pub fn composite_frame(frame: &TargetFrame) -> (RgbaImage, Vec<Warning>) {
    let mut warnings = Vec::new();
    let mut canvas = RgbaImage::new(
        u32::from(frame.header.width),
        u32::from(frame.header.height),
    );

    for cel in &frame.cels {
        let layer = match frame.layers.get(usize::from(cel.layer_index)) {
            Some(layer) => layer,
            None => continue,
        };
        if !layer.is_visible() {
            continue;
        }

        let (pixels, mut cel_warnings) = cel::decode_pixels(cel);
        warnings.append(&mut cel_warnings);
        let pixels = match pixels {
            Some(pixels) => pixels,
            None => continue,
        };

        let opacity = (f64::from(layer.opacity) / 255.0) * (f64::from(cel.opacity) / 255.0);
        blend_cel(&mut canvas, &pixels, cel.x, cel.y, opacity);
    }

    (canvas, warnings)
}

/// Draw one cel's pixels onto the canvas at its offset.
fn blend_cel(canvas: &mut RgbaImage, pixels: &CelPixels, offset_x: i16, offset_y: i16, opacity: f64) {
    let canvas_w = canvas.width() as i32;
    let canvas_h = canvas.height() as i32;

    for sy in 0..i32::from(pixels.height) {
        let dy = i32::from(offset_y) + sy;
        if dy < 0 || dy >= canvas_h {
            continue;
        }
        for sx in 0..i32::from(pixels.width) {
            let dx = i32::from(offset_x) + sx;
            if dx < 0 || dx >= canvas_w {
                continue;
            }
            let index = (sy as usize * usize::from(pixels.width) + sx as usize) * 4;
            let src: [u8; 4] = pixels.rgba[index..index + 4].try_into().unwrap_or([0; 4]);
            let dst = canvas.get_pixel_mut(dx as u32, dy as u32);
            *dst = blend_over(*dst, src, opacity);
        }
    }
}

/// Standard "over" compositing of `src` onto `dst`, with `opacity`
/// scaling the source alpha.
fn blend_over(dst: Rgba<u8>, src: [u8; 4], opacity: f64) -> Rgba<u8> {
    let src_a = (f64::from(src[3]) / 255.0) * opacity;
    if src_a <= 0.0 {
        return dst;
    }
    let dst_a = f64::from(dst[3]) / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        let value = (f64::from(s) * src_a + f64::from(d) * dst_a * (1.0 - src_a)) / out_a;
        value.round() as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}
