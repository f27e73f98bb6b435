//! # readme-banner
//!
//! A build-time generator for interactive README banners. One source image
//! and a declarative TOML layout go in; a directory of image slices and a
//! README where parts of the banner are clickable come out.
//!
//! GitHub READMEs allow no scripts, no image maps, and no CSS. The only way
//! to make regions of an image clickable is to cut the image into pieces and
//! wrap some of the pieces in plain anchors. Done naively that shows seams;
//! done carefully — exact tiling, no whitespace between fragments, percentage
//! widths — the rows reassemble into what looks like a single image.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! A build runs three stages, each a pure function over the previous stage's
//! output:
//!
//! ```text
//! 1. Plan      layout + image width  →  crop regions   (geometry only)
//! 2. Slice     regions + pixels      →  generated/     (extract, encode, hash)
//! 3. Assemble  crop files            →  README.md      (anchors + fillers + footer)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Inspectability**: `plan --json` prints stage 1's output without
//!   touching a single pixel, so layout mistakes are cheap to find.
//! - **Testability**: geometry, encoding, and markup are tested in isolation;
//!   none of the interesting logic needs a real repository to run against.
//! - **Determinism**: every stage is deterministic, so the same input image
//!   and layout always rebuild byte-identical output.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `banner.toml` loading and layout validation |
//! | [`plan`] | Stage 1 — walks rows and links, synthesizes filler, emits ordered crop regions |
//! | [`slice`] | Stage 2 — extracts regions, encodes PNG, writes content-addressed files |
//! | [`assemble`] | Stage 3 — renders anchor/picture fragments and the final document |
//! | [`output`] | CLI output formatting — per-row display of pipeline results |
//!
//! # Design Decisions
//!
//! ## Content-Addressed Crop Files
//!
//! Crops are named by the SHA-256 of their encoded bytes. GitHub's image
//! proxy and browser caches are aggressive; a name that changes with the
//! pixels is the only reliable cache-buster. It also makes builds idempotent:
//! unchanged input reproduces the exact same files and document.
//!
//! ## Maud Over String Templates
//!
//! Fragments are generated with [Maud](https://maud.lambda.xyz/), a
//! compile-time HTML macro system, rather than `format!` strings:
//!
//! - **Compile-time checking**: malformed HTML is a build error, not a broken README.
//! - **Escaping by default**: link URLs land in `href` attributes escaped.
//! - **Type-safe**: attribute values are Rust expressions, not string holes.
//!
//! ## Picture-Wrapped Fillers
//!
//! GitHub wraps every bare `<img>` in an anchor to its own source. Filler
//! slices must not be clickable, so they are wrapped in a `<picture>` element
//! (with light/dark `<source>` entries), which suppresses the auto-link.
//!
//! ## Widths in Percent, Heights in Pixels
//!
//! Each `<img>` gets `width` as a percentage of the source image and its
//! absolute pixel `height`. Percentages make every row sum to 100% of the
//! README column at any rendered size, so the slices never wrap or misalign.
//!
//! ## Declarative Layout
//!
//! Row bands and clickable spans live in `banner.toml`, not in code. Redrawing
//! the banner image means adjusting a handful of coordinates, and the planner
//! synthesizes all the non-clickable filler automatically.

pub mod assemble;
pub mod config;
pub mod output;
pub mod plan;
pub mod slice;

#[cfg(test)]
pub(crate) mod test_helpers;
