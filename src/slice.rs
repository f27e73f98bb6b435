//! Image slicing: extract planned crop regions from the source image, encode
//! each as PNG, and write content-addressed files to the output directory.
//!
//! ## Content-Addressed Filenames
//!
//! Each crop is named `<sha256 of the PNG bytes>.png`. The name changes
//! exactly when the pixels change, so browser and CDN caches never serve a
//! stale crop after the banner is redrawn, and re-running the generator on
//! unchanged input reproduces identical filenames (and therefore an identical
//! document).
//!
//! ## Parallelism
//!
//! Regions are independent, so extraction and encoding run on rayon's thread
//! pool (sized from `[processing]` config at startup). Results are collected
//! back in plan order regardless of completion order.
//!
//! ## Failure Model
//!
//! Any failure aborts the whole run. Crops already written by the time an
//! error surfaces may remain in the output directory; the next successful run
//! clears them.

use crate::plan::CropRegion;
use image::{DynamicImage, ImageFormat, ImageReader};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SliceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read image {path}: {message}")]
    Image { path: String, message: String },
    #[error(
        "Crop at ({left}, {top}) size {width}x{height} falls outside the {image_width}x{image_height} source image"
    )]
    OutOfBounds {
        left: u32,
        top: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },
    #[error("PNG encode error: {0}")]
    Encode(String),
}

/// One written crop file, in plan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropOutput {
    /// Filename within the output directory (`<sha256 hex>.png`).
    pub filename: String,
    /// Crop width in source-image pixels.
    pub width: u32,
    /// Crop height in source-image pixels.
    pub height: u32,
    /// Link target carried over from the plan; `None` for filler.
    pub href: Option<String>,
}

/// Read image dimensions from the file header without decoding pixels.
pub fn probe_dimensions(path: &Path) -> Result<(u32, u32), SliceError> {
    image::image_dimensions(path).map_err(|e| SliceError::Image {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load and decode the source image.
pub fn load_image(path: &Path) -> Result<DynamicImage, SliceError> {
    ImageReader::open(path)
        .map_err(SliceError::Io)?
        .decode()
        .map_err(|e| SliceError::Image {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

/// Remove and recreate the crop output directory.
///
/// The directory is owned by the generator: filenames change with content,
/// so stale crops from earlier runs would otherwise accumulate forever.
pub fn prepare_output_dir(dir: &Path) -> Result<(), SliceError> {
    if dir.exists() {
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Verify every region fits inside an image of the given dimensions, without
/// touching pixels. The `check` command runs this against probed dimensions;
/// `slice_crops` re-checks per region before extracting.
pub fn check_bounds(regions: &[CropRegion], dimensions: (u32, u32)) -> Result<(), SliceError> {
    regions
        .iter()
        .try_for_each(|region| ensure_in_bounds(region, dimensions.0, dimensions.1))
}

fn ensure_in_bounds(
    region: &CropRegion,
    image_width: u32,
    image_height: u32,
) -> Result<(), SliceError> {
    let fits_horizontally = region
        .left
        .checked_add(region.width)
        .is_some_and(|right| right <= image_width);
    let fits_vertically = region
        .top
        .checked_add(region.height)
        .is_some_and(|bottom| bottom <= image_height);
    if !fits_horizontally || !fits_vertically {
        return Err(SliceError::OutOfBounds {
            left: region.left,
            top: region.top,
            width: region.width,
            height: region.height,
            image_width,
            image_height,
        });
    }
    Ok(())
}

/// Extract, encode, and write every planned region.
///
/// Regions are sliced in parallel; the returned outputs are in plan order.
/// The first error encountered aborts the run.
pub fn slice_crops(
    image: &DynamicImage,
    regions: &[CropRegion],
    output_dir: &Path,
) -> Result<Vec<CropOutput>, SliceError> {
    regions
        .par_iter()
        .map(|region| slice_one(image, region, output_dir))
        .collect()
}

fn slice_one(
    image: &DynamicImage,
    region: &CropRegion,
    output_dir: &Path,
) -> Result<CropOutput, SliceError> {
    // crop_imm silently clamps oversized rectangles, so bounds are checked
    // up front: a layout that overruns the image must fail, not shrink.
    ensure_in_bounds(region, image.width(), image.height())?;

    let crop = image.crop_imm(region.left, region.top, region.width, region.height);
    let mut png = Vec::new();
    crop.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| SliceError::Encode(e.to_string()))?;

    let filename = format!("{:x}.png", Sha256::digest(&png));
    // Identical regions hash to the same name; rewriting the same bytes is
    // harmless, so there is no need to check for an existing file.
    fs::write(output_dir.join(&filename), &png)?;

    Ok(CropOutput {
        filename,
        width: region.width,
        height: region.height,
        href: region.href.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{flat_banner, gradient_banner, write_banner_png};
    use tempfile::TempDir;

    fn region(left: u32, top: u32, width: u32, height: u32) -> CropRegion {
        CropRegion {
            left,
            top,
            width,
            height,
            href: None,
        }
    }

    // =========================================================================
    // Slicing
    // =========================================================================

    #[test]
    fn slices_are_written_as_hashed_pngs() {
        let tmp = TempDir::new().unwrap();
        let image = gradient_banner(32, 16);
        let regions = vec![region(0, 0, 10, 16), region(10, 0, 22, 16)];

        let outputs = slice_crops(&image, &regions, tmp.path()).unwrap();

        assert_eq!(outputs.len(), 2);
        for output in &outputs {
            let (hash, ext) = output.filename.split_at(64);
            assert_eq!(ext, ".png");
            assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
            assert!(tmp.path().join(&output.filename).exists());
        }
    }

    #[test]
    fn outputs_preserve_plan_order_and_metadata() {
        let tmp = TempDir::new().unwrap();
        let image = gradient_banner(30, 10);
        let regions = vec![
            CropRegion {
                left: 0,
                top: 0,
                width: 12,
                height: 10,
                href: None,
            },
            CropRegion {
                left: 12,
                top: 0,
                width: 18,
                height: 10,
                href: Some("http://x".to_string()),
            },
        ];

        let outputs = slice_crops(&image, &regions, tmp.path()).unwrap();

        assert_eq!(outputs[0].width, 12);
        assert_eq!(outputs[0].href, None);
        assert_eq!(outputs[1].width, 18);
        assert_eq!(outputs[1].href.as_deref(), Some("http://x"));
    }

    #[test]
    fn written_crop_decodes_to_region_dimensions() {
        let tmp = TempDir::new().unwrap();
        let image = gradient_banner(40, 20);

        let outputs = slice_crops(&image, &[region(5, 3, 17, 11)], tmp.path()).unwrap();

        let crop = image::open(tmp.path().join(&outputs[0].filename)).unwrap();
        assert_eq!(crop.width(), 17);
        assert_eq!(crop.height(), 11);
    }

    #[test]
    fn identical_content_yields_identical_filename() {
        let tmp = TempDir::new().unwrap();
        let image = flat_banner(20, 10);
        // Same size, different position, same pixels
        let regions = vec![region(0, 0, 5, 10), region(10, 0, 5, 10)];

        let outputs = slice_crops(&image, &regions, tmp.path()).unwrap();

        assert_eq!(outputs[0].filename, outputs[1].filename);
        let files: Vec<_> = std::fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn distinct_content_yields_distinct_filenames() {
        let tmp = TempDir::new().unwrap();
        let image = gradient_banner(20, 10);
        let regions = vec![region(0, 0, 5, 10), region(10, 0, 5, 10)];

        let outputs = slice_crops(&image, &regions, tmp.path()).unwrap();

        assert_ne!(outputs[0].filename, outputs[1].filename);
    }

    #[test]
    fn region_flush_with_image_edges_is_accepted() {
        let tmp = TempDir::new().unwrap();
        let image = gradient_banner(16, 9);

        let outputs = slice_crops(&image, &[region(0, 0, 16, 9)], tmp.path()).unwrap();
        assert_eq!(outputs.len(), 1);
    }

    #[test]
    fn region_past_right_edge_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let image = gradient_banner(16, 9);

        let err = slice_crops(&image, &[region(10, 0, 7, 9)], tmp.path()).unwrap_err();
        assert!(matches!(err, SliceError::OutOfBounds { .. }));
    }

    #[test]
    fn region_past_bottom_edge_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let image = gradient_banner(16, 9);

        let err = slice_crops(&image, &[region(0, 4, 16, 6)], tmp.path()).unwrap_err();
        assert!(matches!(err, SliceError::OutOfBounds { .. }));
        assert!(err.to_string().contains("16x9"));
    }

    #[test]
    fn empty_plan_slices_nothing() {
        let tmp = TempDir::new().unwrap();
        let image = gradient_banner(8, 8);

        let outputs = slice_crops(&image, &[], tmp.path()).unwrap();
        assert!(outputs.is_empty());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    // =========================================================================
    // Bounds checking
    // =========================================================================

    #[test]
    fn check_bounds_accepts_fitting_regions() {
        let regions = vec![region(0, 0, 10, 5), region(10, 0, 6, 9)];
        check_bounds(&regions, (16, 9)).unwrap();
    }

    #[test]
    fn check_bounds_rejects_overrun() {
        let regions = vec![region(0, 0, 10, 5), region(10, 0, 6, 10)];
        let err = check_bounds(&regions, (16, 9)).unwrap_err();
        assert!(matches!(err, SliceError::OutOfBounds { .. }));
    }

    #[test]
    fn check_bounds_empty_plan_is_fine() {
        check_bounds(&[], (1, 1)).unwrap();
    }

    // =========================================================================
    // Output directory lifecycle
    // =========================================================================

    #[test]
    fn prepare_output_dir_creates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("generated");

        prepare_output_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn prepare_output_dir_clears_stale_files() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("generated");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("stale.png"), b"old").unwrap();

        prepare_output_dir(&dir).unwrap();

        assert!(dir.is_dir());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn prepare_output_dir_creates_nested_path() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a").join("b").join("generated");

        prepare_output_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    // =========================================================================
    // Probing and loading
    // =========================================================================

    #[test]
    fn probe_reads_dimensions_from_header() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("banner.png");
        write_banner_png(&path, 123, 45);

        assert_eq!(probe_dimensions(&path).unwrap(), (123, 45));
    }

    #[test]
    fn probe_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = probe_dimensions(&tmp.path().join("nope.png"));
        assert!(result.is_err());
    }

    #[test]
    fn load_image_roundtrips_dimensions() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("banner.png");
        write_banner_png(&path, 64, 32);

        let image = load_image(&path).unwrap();
        assert_eq!((image.width(), image.height()), (64, 32));
    }

    #[test]
    fn load_image_rejects_non_image_bytes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("banner.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, SliceError::Image { .. }));
    }

    #[test]
    fn load_image_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_image(&tmp.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, SliceError::Io(_)));
    }
}
