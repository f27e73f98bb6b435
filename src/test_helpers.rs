//! Shared test utilities for the readme-banner test suite.
//!
//! Provides builders for layout configs and synthetic banner images, used by
//! the unit tests across modules.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let config = layout(vec![
//!     row(50, &[(5, 15, "http://x")]),
//!     row(120, &[]),
//! ]);
//! let image = gradient_banner(640, 200);
//! ```

use crate::config::{BannerConfig, LinkConfig, RowConfig};
use image::{DynamicImage, RgbaImage};
use std::path::Path;

// =========================================================================
// Layout builders
// =========================================================================

/// Build a row band ending at `bottom_y` from `(left_x, right_x, href)` spans.
pub fn row(bottom_y: u32, spans: &[(u32, u32, &str)]) -> RowConfig {
    RowConfig {
        bottom_y,
        links: spans
            .iter()
            .map(|&(left_x, right_x, href)| LinkConfig {
                left_x,
                right_x,
                href: href.to_string(),
            })
            .collect(),
    }
}

/// Default config wrapping the given rows.
pub fn layout(rows: Vec<RowConfig>) -> BannerConfig {
    BannerConfig {
        rows,
        ..BannerConfig::default()
    }
}

// =========================================================================
// Synthetic banner images
// =========================================================================

/// Gradient test image: every pixel differs, so distinct regions always
/// produce distinct crops (and distinct content hashes).
pub fn gradient_banner(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8, 255])
    }))
}

/// Single-color test image: any two same-size regions are identical.
pub fn flat_banner(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        image::Rgba([7, 7, 7, 255]),
    ))
}

/// Write a gradient banner PNG to `path`.
pub fn write_banner_png(path: &Path, width: u32, height: u32) {
    gradient_banner(width, height).save(path).unwrap();
}
