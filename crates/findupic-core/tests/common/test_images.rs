use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ColorType, Frame, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// The 2x2 raster whose digest is pinned in the tests
pub fn golden_raster() -> RgbaImage {
    let mut raster = RgbaImage::new(2, 2);
    raster.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
    raster.put_pixel(1, 1, Rgba([0, 0, 255, 255]));
    raster
}

/// An opaque 2x2 raster built from a seed colour
pub fn opaque_raster(seed: u8) -> RgbImage {
    RgbImage::from_fn(2, 2, |x, y| {
        Rgb([seed, seed.wrapping_add(x as u8 * 60), seed.wrapping_add(y as u8 * 90)])
    })
}

/// Write an RGBA PNG
pub fn write_rgba_png(dir: &Path, name: &str, raster: &RgbaImage) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    PngEncoder::new_with_quality(file, CompressionType::Best, FilterType::Paeth)
        .write_image(raster.as_raw(), raster.width(), raster.height(), ColorType::Rgba8)
        .unwrap();
    path
}

/// Write an RGB PNG; the same pixels as an opaque RGBA PNG but different bytes
pub fn write_rgb_png(dir: &Path, name: &str, raster: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    PngEncoder::new_with_quality(file, CompressionType::Fast, FilterType::NoFilter)
        .write_image(raster.as_raw(), raster.width(), raster.height(), ColorType::Rgb8)
        .unwrap();
    path
}

/// Expand an RGB raster to opaque RGBA
pub fn to_rgba(raster: &RgbImage) -> RgbaImage {
    RgbaImage::from_fn(raster.width(), raster.height(), |x, y| {
        let Rgb([r, g, b]) = *raster.get_pixel(x, y);
        Rgba([r, g, b, 255])
    })
}

/// Write a baseline JPEG
pub fn write_jpeg(dir: &Path, name: &str, raster: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    JpegEncoder::new_with_quality(file, 90)
        .write_image(raster.as_raw(), raster.width(), raster.height(), ColorType::Rgb8)
        .unwrap();
    path
}

/// Write a single-frame GIF
pub fn write_gif(dir: &Path, name: &str, raster: &RgbaImage) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    let mut encoder = GifEncoder::new(file);
    encoder.encode_frame(Frame::new(raster.clone())).unwrap();
    path
}

/// Write a file that carries an image extension but no image
pub fn write_corrupt(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).unwrap();
    file.write_all(b"DUMMY IMAGE DATA").unwrap();
    path
}

/// Copy a file byte for byte under a new name
pub fn copy_as(source: &Path, dir: &Path, name: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    fs::copy(source, &path).unwrap();
    path
}
