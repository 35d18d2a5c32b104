//! Content digests of decoded images.
//!
//! The digest is SHA-256 over the canonical RGBA8 raster produced by
//! [`normalize`](super::normalize::normalize), so it depends on the picture
//! alone: file names, timestamps and container metadata never contribute.
//! Lossless re-encodes (a PNG saved with a different compression level or
//! colour type) keep their digest; lossy re-encodes generally do not.
use crate::error::Result;
use crate::types::Digest;

use image::io::Reader as ImageReader;
use sha2::{Digest as _, Sha256};
use std::path::Path;

use super::normalize::{canonical_bytes, normalize};

/// Compute the SHA-256 digest of a canonical byte sequence
pub fn compute_digest(bytes: &[u8]) -> Digest {
    let hash: [u8; 32] = Sha256::digest(bytes).into();
    Digest::from(hash)
}

/// Decode the image at `path` and hash its canonical raster.
///
/// The container format is sniffed from the file content, falling back to the
/// extension. Animated GIFs contribute their first frame only.
pub fn hash_image<P: AsRef<Path>>(path: P) -> Result<Digest> {
    let image = ImageReader::open(&path)?.with_guessed_format()?.decode()?;

    let raster = normalize(image);
    Ok(compute_digest(canonical_bytes(&raster)))
}
