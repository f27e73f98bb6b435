//! Crop planning: turns a row/link layout into an ordered list of crop
//! regions covering the banner image.
//!
//! The planner is pure geometry. It never touches pixels; it only walks the
//! configured rows with a cursor and decides where each crop starts and ends.
//!
//! ```text
//!   x=0                                          x=image_width
//!   ┌─────────┬──────────────┬───────────────────┐  ─ y=0
//!   │ filler  │  link "a"    │      filler       │    row 0
//!   ├─────────┴──────────────┴───────────────────┤  ─ y=rows[0].bottom_y
//!   │              (line_height gap)             │
//!   ├──────────────────┬─────────────┬───────────┤  ─ next row top
//!   │      filler      │  link "b"   │  filler   │    row 1
//!   └──────────────────┴─────────────┴───────────┘  ─ y=rows[1].bottom_y
//! ```
//!
//! Within each row the horizontal cursor starts at 0; a filler is emitted
//! before any link that does not touch the cursor, and a trailing filler pads
//! the row out to the full image width. Rows therefore always tile the image
//! horizontally with no gaps or overlaps. The vertical gap between rows is
//! intentionally unplanned: nothing is rendered for it, which is what makes
//! the reassembled rows sit at normal line spacing in the document.
//!
//! Regions come out in reading order (top-to-bottom, left-to-right), and the
//! assembler relies on that order to reconstruct the banner.

use crate::config::{BannerConfig, LATEST_CONTENT_TOKEN};
use serde::Serialize;

/// One planned crop: a rectangle in source-image pixels, plus the resolved
/// link target for clickable regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CropRegion {
    /// Left edge, inclusive.
    pub left: u32,
    /// Top edge, inclusive.
    pub top: u32,
    pub width: u32,
    pub height: u32,
    /// `Some` for link regions, `None` for filler.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl CropRegion {
    /// Whether this region is synthesized filler rather than a configured link.
    pub fn is_filler(&self) -> bool {
        self.href.is_none()
    }
}

/// Resolve the href actually written into the document: the configured URL
/// with the placeholder token substituted.
fn resolve_href(href: &str, latest_content_url: Option<&str>) -> String {
    match latest_content_url {
        Some(url) => href.replace(LATEST_CONTENT_TOKEN, url),
        None => href.to_string(),
    }
}

/// Walk the configured rows and produce the full crop plan.
///
/// `image_width` is the width of the source image; every row is padded out
/// to it. Zero-width regions (a link span with `left_x == right_x`, or
/// filler between abutting spans) are skipped rather than emitted, since a
/// zero-width crop can neither be extracted nor rendered.
///
/// The planner trusts the config has been validated: spans are ordered and
/// non-overlapping, each row band has positive height, and the row cursor
/// cannot overflow.
pub fn plan_crops(image_width: u32, config: &BannerConfig) -> Vec<CropRegion> {
    let latest = config.latest_content_url.as_deref();
    let mut regions = Vec::new();
    let mut top = 0u32;

    for row in &config.rows {
        let height = row.bottom_y - top;
        let mut x = 0u32;

        for link in &row.links {
            if x < link.left_x {
                regions.push(CropRegion {
                    left: x,
                    top,
                    width: link.left_x - x,
                    height,
                    href: None,
                });
            }
            if link.right_x > link.left_x {
                regions.push(CropRegion {
                    left: link.left_x,
                    top,
                    width: link.right_x - link.left_x,
                    height,
                    href: Some(resolve_href(&link.href, latest)),
                });
            }
            x = link.right_x;
        }

        if x < image_width {
            regions.push(CropRegion {
                left: x,
                top,
                width: image_width - x,
                height,
                href: None,
            });
        }

        top = row.bottom_y + config.line_height;
    }

    regions
}
