//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every crop is its semantic identity — positional index, kind, and link
//! target — with hashed filenames shown as secondary context via indented
//! `Output:` lines. Hashes mean nothing to a reader; the link structure does.
//!
//! # Output Format
//!
//! ## Plan
//!
//! ```text
//! 001 Row y 0..50 (3 crops)
//!     001 x 0..5 filler
//!     002 x 5..15 → https://github.com/example
//!     003 x 15..20 filler
//!
//! Plan: 3 crops (1 links, 2 fillers) in 1 rows
//! ```
//!
//! ## Build
//!
//! ```text
//! 001 filler
//!     Output: generated/3a7bd3….png (5x50 px)
//! 002 link https://github.com/example
//!     Output: generated/9f86d0….png (10x50 px)
//! 003 filler
//!     Output: generated/3a7bd3….png (5x50 px)
//!
//! Wrote 3 crops (1 links, 2 fillers) into 2 files and README.md
//! ```
//!
//! The file count is the number of distinct hashes on disk; identical crops
//! (like the two fillers above) share one file.
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::config::BannerConfig;
use crate::plan::CropRegion;
use crate::slice::CropOutput;
use std::collections::HashSet;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Format a row header: positional index + vertical span + crop count.
///
/// ```text
/// 001 Row y 0..50 (3 crops)
/// ```
fn row_header(index: usize, top: u32, bottom: u32, crops: usize) -> String {
    format!("{} Row y {}..{} ({} crops)", format_index(index), top, bottom, crops)
}

/// Summary counts for a list of crops, split into links and fillers.
fn crop_counts(total: usize, links: usize) -> String {
    format!("{} crops ({} links, {} fillers)", total, links, total - links)
}

// ============================================================================
// Plan output
// ============================================================================

/// Format the crop plan as a per-row listing.
///
/// Rows are recovered from the plan's reading order: a new vertical offset
/// starts a new row. Each crop leads with its index and horizontal span;
/// links show their resolved target, fillers are just marked as such.
pub fn format_plan_output(regions: &[CropRegion]) -> Vec<String> {
    let mut lines = Vec::new();
    let links = regions.iter().filter(|r| !r.is_filler()).count();

    let mut rows = 0usize;
    let mut crop_in_row = 0usize;
    let mut current_top = None;

    for region in regions {
        if current_top != Some(region.top) {
            current_top = Some(region.top);
            rows += 1;
            crop_in_row = 0;
            let row_crops = regions.iter().filter(|r| r.top == region.top).count();
            lines.push(row_header(
                rows,
                region.top,
                region.top + region.height,
                row_crops,
            ));
        }
        crop_in_row += 1;
        let span = format!("x {}..{}", region.left, region.left + region.width);
        let crop_line = match &region.href {
            Some(href) => format!("{} {} \u{2192} {}", format_index(crop_in_row), span, href),
            None => format!("{} {} filler", format_index(crop_in_row), span),
        };
        lines.push(format!("    {}", crop_line));
    }

    if !regions.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Plan: {} in {} rows",
        crop_counts(regions.len(), links),
        rows
    ));
    lines
}

/// Print plan output to stdout.
pub fn print_plan_output(regions: &[CropRegion]) {
    for line in format_plan_output(regions) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format build output showing written crop files.
///
/// Information-first: each crop leads with its positional index and link
/// target (or `filler`); the hashed output file is indented context.
pub fn format_build_output(outputs: &[CropOutput], output_dir: &str, readme: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let links = outputs.iter().filter(|o| o.href.is_some()).count();
    let files: HashSet<&str> = outputs.iter().map(|o| o.filename.as_str()).collect();

    for (i, output) in outputs.iter().enumerate() {
        let header = match &output.href {
            Some(href) => format!("{} link {}", format_index(i + 1), href),
            None => format!("{} filler", format_index(i + 1)),
        };
        lines.push(header);
        lines.push(format!(
            "    Output: {} ({}x{} px)",
            Path::new(output_dir).join(&output.filename).display(),
            output.width,
            output.height
        ));
    }

    if !outputs.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Wrote {} into {} files and {}",
        crop_counts(outputs.len(), links),
        files.len(),
        readme
    ));
    lines
}

/// Print build output to stdout.
pub fn print_build_output(outputs: &[CropOutput], output_dir: &str, readme: &str) {
    for line in format_build_output(outputs, output_dir, readme) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format check output: what the config resolves to, without writing anything.
pub fn format_check_output(
    config: &BannerConfig,
    dimensions: (u32, u32),
    regions: &[CropRegion],
) -> Vec<String> {
    let links: usize = config.rows.iter().map(|r| r.links.len()).sum();
    let planned_links = regions.iter().filter(|r| !r.is_filler()).count();

    vec![
        format!("Image: {} ({}x{})", config.image, dimensions.0, dimensions.1),
        format!("Rows: {} ({} links)", config.rows.len(), links),
        format!("Plan: {}", crop_counts(regions.len(), planned_links)),
        format!(
            "Output: {}/ + {}",
            config.output_dir.trim_end_matches('/'),
            config.readme
        ),
        "Layout OK".to_string(),
    ]
}

/// Print check output to stdout.
pub fn print_check_output(config: &BannerConfig, dimensions: (u32, u32), regions: &[CropRegion]) {
    for line in format_check_output(config, dimensions, regions) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
