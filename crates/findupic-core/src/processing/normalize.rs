//! Conversion of decoded images into the canonical RGBA8 raster.
//!
//! Every colour model the decoders produce (luma, luma+alpha, RGB, RGBA, the
//! 16-bit and float variants, palette images expanded by the decoder) ends up
//! as 8 bits per channel RGBA covering the full image bounds. Pixels are copied,
//! never composited: alpha is carried through as-is and colour channels are not
//! premultiplied, so two rasters that only differ in how a transparent pixel's
//! colour is encoded still hash differently.

use image::{DynamicImage, RgbaImage};

/// Produce the canonical raster for a decoded image.
///
/// An image that is already 8-bit RGBA is moved out without copying.
pub fn normalize(image: DynamicImage) -> RgbaImage {
    match image {
        DynamicImage::ImageRgba8(raster) => raster,
        other => other.to_rgba8(),
    }
}

/// Row-major, left-to-right, top-to-bottom bytes of a canonical raster, 4 per pixel
pub fn canonical_bytes(raster: &RgbaImage) -> &[u8] {
    raster.as_raw()
}
