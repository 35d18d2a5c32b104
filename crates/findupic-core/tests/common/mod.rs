#![allow(dead_code)]

pub mod test_images;
pub use test_images::*;

use findupic_core::Config;

/// Config for deterministic single-threaded runs
pub fn sequential_config() -> Config {
    Config {
        threads: 1,
        ..Default::default()
    }
}
