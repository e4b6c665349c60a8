//! Criterion benchmarks for the converter's critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - Compositor: blending a full-canvas cel
//! - PNG encoder: serializing an RGBA canvas
//! - CRC-32: checksumming chunk-sized buffers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use asepng::compositor::composite_frame;
use asepng::crc32::crc32;
use asepng::document::{Cel, DocumentHeader, Layer, TargetFrame};
use asepng::png;
use image::RgbaImage;

/// Build a frame with one opaque full-canvas raw cel.
fn make_frame(size: u16) -> TargetFrame {
    let mut payload = Vec::new();
    payload.extend_from_slice(&size.to_le_bytes());
    payload.extend_from_slice(&size.to_le_bytes());
    let pixels = usize::from(size) * usize::from(size) * 4;
    payload.extend((0..pixels).map(|i| (i % 251) as u8));

    TargetFrame {
        header: DocumentHeader {
            file_size: 0,
            frame_count: 1,
            width: size,
            height: size,
            color_depth: 32,
            flags: 0,
            speed: 100,
            transparent_index: 0,
            palette_size: 0,
            pixel_width: 1,
            pixel_height: 1,
            grid_x: 0,
            grid_y: 0,
            grid_width: 16,
            grid_height: 16,
        },
        duration_ms: 100,
        layers: vec![Layer {
            flags: 1,
            layer_type: 0,
            child_level: 0,
            blend_mode: 0,
            opacity: 255,
            name: "bench".to_string(),
        }],
        cels: vec![Cel {
            layer_index: 0,
            x: 0,
            y: 0,
            opacity: 200,
            cel_type: 0,
            payload,
        }],
    }
}

fn bench_compositor(c: &mut Criterion) {
    let mut group = c.benchmark_group("compositor");
    for size in [32u16, 128, 256] {
        let frame = make_frame(size);
        group.throughput(Throughput::Bytes(u64::from(size) * u64::from(size) * 4));
        group.bench_with_input(BenchmarkId::from_parameter(size), &frame, |b, frame| {
            b.iter(|| composite_frame(black_box(frame)));
        });
    }
    group.finish();
}

fn bench_png_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("png_encode");
    for size in [32u32, 128, 256] {
        let image = RgbaImage::from_fn(size, size, |x, y| {
            image::Rgba([x as u8, y as u8, (x ^ y) as u8, 255])
        });
        group.throughput(Throughput::Bytes(u64::from(size) * u64::from(size) * 4));
        group.bench_with_input(BenchmarkId::from_parameter(size), &image, |b, image| {
            b.iter(|| png::encode(black_box(image)).unwrap());
        });
    }
    group.finish();
}

fn bench_crc32(c: &mut Criterion) {
    let data: Vec<u8> = (0..64 * 1024).map(|i| (i % 256) as u8).collect();
    let mut group = c.benchmark_group("crc32");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("64k", |b| b.iter(|| crc32(black_box(&data))));
    group.finish();
}

criterion_group!(benches, bench_compositor, bench_png_encode, bench_crc32);
criterion_main!(benches);
