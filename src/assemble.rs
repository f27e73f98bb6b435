//! Document assembly: renders the sliced crops back into one seamless,
//! partially clickable banner in the README.
//!
//! ## Markup Shape
//!
//! Every crop becomes an `<img>` with an absolute pixel height and a width
//! expressed as a percentage of the source image, so the row scales with the
//! README column while the slices keep their relative proportions.
//!
//! Link crops are wrapped in a plain anchor:
//!
//! ```text
//! <a href="https://..."><img src="generated/<hash>.png" height="50" width="25%"></a>
//! ```
//!
//! Filler crops must not be clickable, but GitHub wraps any bare `<img>` in
//! an anchor to its own source when rendering markdown. Wrapping the filler
//! in a `<picture>` element suppresses that, so fillers stay inert:
//!
//! ```text
//! <picture><source media="(prefers-color-scheme: light)" srcset="...">
//!          <source media="(prefers-color-scheme: dark)" srcset="...">
//!          <img src="..." height="50" width="25%"></picture>
//! ```
//!
//! Fragments are concatenated with no separator whatsoever: whitespace
//! between inline elements would render as visible gaps between the slices
//! and break the illusion of a single image.
//!
//! The document ends with a fixed footer hinting that the banner is
//! interactive. It is markdown, so it is appended after HTML rendering
//! rather than routed through the template engine.

use crate::slice::CropOutput;
use maud::{Markup, html};

/// Markdown footer appended after the banner fragments.
pub const FOOTER: &str =
    "\n###### 👆 The above image is interactive! Try clicking on the tabs :)";

/// Public URL of a crop file.
fn image_src(base_url: &str, filename: &str) -> String {
    format!("{base_url}{filename}")
}

/// Crop width as a percentage of the source image width.
///
/// Percentages keep each row summing to exactly 100% of the README column,
/// whatever the rendered size.
fn width_percent(width: u32, image_width: u32) -> String {
    format!("{}%", (width as f64 / image_width as f64) * 100.0)
}

/// Render one crop as an HTML fragment.
fn crop_markup(crop: &CropOutput, image_width: u32, base_url: &str) -> Markup {
    let src = image_src(base_url, &crop.filename);
    let width = width_percent(crop.width, image_width);
    let img = html! {
        img src=(src) height=(crop.height) width=(width);
    };

    match &crop.href {
        Some(href) => html! {
            a href=(href) { (img) }
        },
        None => html! {
            picture {
                source media="(prefers-color-scheme: light)" srcset=(src);
                source media="(prefers-color-scheme: dark)" srcset=(src);
                (img)
            }
        },
    }
}

/// Render the complete document: all crop fragments in plan order, joined
/// with no separator, followed by the footer.
pub fn assemble_document(crops: &[CropOutput], image_width: u32, base_url: &str) -> String {
    let banner = html! {
        @for crop in crops {
            (crop_markup(crop, image_width, base_url))
        }
    };

    let mut document = banner.into_string();
    document.push_str(FOOTER);
    document
}
