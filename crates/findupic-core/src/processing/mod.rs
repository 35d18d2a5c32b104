// Core modules
mod crypto_hash;
pub mod normalize;

// Expose content hash calculations
pub use crypto_hash::*;

// Expose the pixel normalizer
pub use normalize::{canonical_bytes, normalize};
