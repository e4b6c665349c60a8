//! PNG output and file path generation

use std::io;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::RgbaImage;

/// Resolve the output path for a conversion.
///
/// With an explicit `-o` argument that path is used as-is, unless it is
/// a directory, in which case the input's basename (with a `.png`
/// extension) is placed inside it. Without `-o`, the output lands next
/// to the input with the extension swapped to `.png`.
pub fn generate_output_path(input: &Path, output_arg: Option<&Path>) -> PathBuf {
    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
            if is_dir {
                let stem = input
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("output");
                output.join(format!("{}.png", stem))
            } else {
                output.to_path_buf()
            }
        }
        None => input.with_extension("png"),
    }
}

/// Write PNG bytes to disk, creating parent directories as needed.
pub fn write_png(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)
}

/// Scale image by integer factor using nearest-neighbor interpolation.
///
/// This preserves crisp pixel edges for pixel art. A factor of 1
/// returns the image unchanged.
pub fn scale_image(image: RgbaImage, factor: u8) -> RgbaImage {
    if factor <= 1 {
        return image;
    }
    let (w, h) = image.dimensions();
    let new_w = w * u32::from(factor);
    let new_h = h * u32::from(factor);
    image::imageops::resize(&image, new_w, new_h, FilterType::Nearest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_default_path_swaps_extension() {
        let path = generate_output_path(Path::new("sprites/hero.aseprite"), None);
        assert_eq!(path, PathBuf::from("sprites/hero.png"));
    }

    #[test]
    fn test_default_path_short_extension() {
        let path = generate_output_path(Path::new("hero.ase"), None);
        assert_eq!(path, PathBuf::from("hero.png"));
    }

    #[test]
    fn test_explicit_file_path() {
        let path = generate_output_path(
            Path::new("hero.aseprite"),
            Some(Path::new("out/frame.png")),
        );
        assert_eq!(path, PathBuf::from("out/frame.png"));
    }

    #[test]
    fn test_explicit_directory_path() {
        let path = generate_output_path(Path::new("art/hero.aseprite"), Some(Path::new("out/")));
        assert_eq!(path, PathBuf::from("out/hero.png"));
    }

    #[test]
    fn test_scale_image_nearest() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([0, 255, 0, 255]));

        let scaled = scale_image(image, 3);
        assert_eq!(scaled.dimensions(), (6, 3));
        assert_eq!(scaled.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(scaled.get_pixel(2, 2), &Rgba([255, 0, 0, 255]));
        assert_eq!(scaled.get_pixel(3, 0), &Rgba([0, 255, 0, 255]));
        assert_eq!(scaled.get_pixel(5, 2), &Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn test_scale_factor_one_is_identity() {
        let image = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 4]));
        let scaled = scale_image(image.clone(), 1);
        assert_eq!(scaled, image);
    }

    #[test]
    fn test_write_png_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deep/out.png");
        write_png(&path, &[1, 2, 3]).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    }
}
