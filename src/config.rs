//! Banner configuration module.
//!
//! Handles loading and validating `banner.toml`, the declarative description
//! of the banner layout: which source image to slice, where the row bands
//! sit, and which horizontal spans inside each band are clickable.
//!
//! ## Config File
//!
//! ```toml
//! # All scalar settings are optional - defaults shown below
//! image = "banner.png"        # source image to slice
//! output_dir = "generated"    # crop output directory (owned by the generator)
//! readme = "README.md"        # assembled document path
//! line_height = 6             # vertical gap between row bands (pixels)
//! base_url = "generated/"     # public URL prefix for crop files
//!
//! # Substituted for the ${LATEST_CONTENT_URL} token in link hrefs.
//! # Required only when a href uses the token.
//! # latest_content_url = "https://example.com/latest"
//!
//! [processing]
//! # max_threads = 4           # omit for auto (= CPU cores)
//!
//! [[rows]]
//! bottom_y = 56               # exclusive bottom boundary of the row band
//!
//! [[rows.links]]
//! left_x = 12
//! right_x = 120
//! href = "https://github.com/example"
//! ```
//!
//! Relative paths (`image`, `output_dir`, `readme`) are resolved against the
//! directory containing the config file.
//!
//! ## Validation
//!
//! Config files are checked once at load time. Unknown keys are rejected to
//! catch typos early. Geometry rules: every link span must satisfy
//! `left_x <= right_x`, links within a row must be ordered left-to-right
//! without overlap, and every row band must have positive height given the
//! running vertical cursor. A href using `${LATEST_CONTENT_URL}` requires
//! `latest_content_url` to be set.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Placeholder token in link hrefs, replaced with `latest_content_url`
/// when the crop plan is built.
pub const LATEST_CONTENT_TOKEN: &str = "${LATEST_CONTENT_URL}";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Banner layout configuration loaded from `banner.toml`.
///
/// All scalar fields have defaults; only `rows` carries the layout itself.
/// Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BannerConfig {
    /// Path to the source image, relative to the config file.
    pub image: String,
    /// Directory the cropped PNGs are written to. Cleared and recreated on
    /// every run, so nothing else should live there.
    pub output_dir: String,
    /// Path of the assembled document, fully overwritten on every run.
    pub readme: String,
    /// Vertical gap in pixels between one row's bottom boundary and the
    /// next row's top.
    pub line_height: u32,
    /// Public URL prefix prepended to crop filenames in the generated
    /// markup. The default keeps links relative to the repository.
    pub base_url: String,
    /// Substitution target for [`LATEST_CONTENT_TOKEN`] in link hrefs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_content_url: Option<String>,
    /// Parallel slicing settings.
    pub processing: ProcessingConfig,
    /// Row bands, top to bottom.
    pub rows: Vec<RowConfig>,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            image: "banner.png".to_string(),
            output_dir: "generated".to_string(),
            readme: "README.md".to_string(),
            line_height: 6,
            base_url: "generated/".to_string(),
            latest_content_url: None,
            processing: ProcessingConfig::default(),
            rows: Vec::new(),
        }
    }
}

/// One horizontal band of the banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RowConfig {
    /// Exclusive bottom boundary of the band, in source-image pixels.
    pub bottom_y: u32,
    /// Clickable spans within the band, left to right.
    #[serde(default)]
    pub links: Vec<LinkConfig>,
}

/// A clickable horizontal span within a row band.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkConfig {
    /// Inclusive left boundary of the span.
    pub left_x: u32,
    /// Exclusive right boundary of the span.
    pub right_x: u32,
    /// Target URL. May contain [`LATEST_CONTENT_TOKEN`].
    pub href: String,
}

impl BannerConfig {
    /// Validate geometry and cross-field rules.
    ///
    /// The tiling invariant (each row covers the full image width with no
    /// gaps or overlaps) only holds for ordered, non-overlapping links and
    /// non-empty bands, so malformed layouts are rejected here rather than
    /// producing a broken plan.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut y = 0u32;
        for (i, row) in self.rows.iter().enumerate() {
            if row.bottom_y <= y {
                return Err(ConfigError::Validation(format!(
                    "rows[{i}].bottom_y = {} does not clear the band's top at y = {}",
                    row.bottom_y, y
                )));
            }
            let mut x = 0u32;
            for (j, link) in row.links.iter().enumerate() {
                if link.right_x < link.left_x {
                    return Err(ConfigError::Validation(format!(
                        "rows[{i}].links[{j}] has right_x {} left of left_x {}",
                        link.right_x, link.left_x
                    )));
                }
                if link.left_x < x {
                    return Err(ConfigError::Validation(format!(
                        "rows[{i}].links[{j}] starts at {} before the previous span ends at {}",
                        link.left_x, x
                    )));
                }
                if link.href.contains(LATEST_CONTENT_TOKEN) && self.latest_content_url.is_none() {
                    return Err(ConfigError::Validation(format!(
                        "rows[{i}].links[{j}] uses {LATEST_CONTENT_TOKEN} but latest_content_url is not set"
                    )));
                }
                x = link.right_x;
            }
            // Unchecked addition would wrap here and let the next band land
            // on top of this one.
            y = row.bottom_y.checked_add(self.line_height).ok_or_else(|| {
                ConfigError::Validation(format!(
                    "rows[{i}].bottom_y = {} plus line_height {} overflows the pixel range",
                    row.bottom_y, self.line_height
                ))
            })?;
        }
        Ok(())
    }
}

/// Parallel slicing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel slicing workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_threads: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_threads.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Load and validate a banner config file.
///
/// Unlike scalar settings, the file itself is not optional: the layout is
/// the program's input, so a missing file is an error.
pub fn load_config(path: &Path) -> Result<BannerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: BannerConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Load a config file together with the directory its relative paths
/// (`image`, `output_dir`, `readme`) resolve against: the directory
/// containing the config file, so the tool can run from anywhere.
pub fn load_layout(path: &Path) -> Result<(BannerConfig, PathBuf), ConfigError> {
    let config = load_config(path)?;
    let root = path.parent().unwrap_or(Path::new(".")).to_path_buf();
    Ok((config, root))
}

/// Returns a fully-commented stock `banner.toml` with all keys explained.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# readme-banner configuration
# ============================
# Scalar settings are optional; values shown are the defaults.
# Coordinates are pixels in the source image.

# Source image to slice.
image = "banner.png"

# Directory the cropped PNGs are written to. It is cleared and recreated on
# every run, so keep it dedicated to the generator.
output_dir = "generated"

# Assembled document path, fully overwritten on every run.
readme = "README.md"

# Vertical gap in pixels between one row's bottom boundary and the next
# row's top (the "line height" of the banner text).
line_height = 6

# Public URL prefix for crop files in the generated markup. The default
# keeps image links relative to the repository; point it at a pages site
# (e.g. "https://user.github.io/repo/generated/") for absolute URLs.
base_url = "generated/"

# Substituted for the literal ${LATEST_CONTENT_URL} token in link hrefs.
# Only required when a href uses the token.
# latest_content_url = "https://example.com/latest"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel slicing workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_threads = 4

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
# Rows are horizontal bands, top to bottom. Each row ends at bottom_y
# (exclusive); the next row starts line_height pixels below. Links are
# clickable spans inside the band, left to right; everything between and
# around them becomes non-clickable filler automatically.

[[rows]]
bottom_y = 56

[[rows.links]]
left_x = 12
right_x = 120
href = "https://github.com/example"

[[rows.links]]
left_x = 132
right_x = 240
href = "https://example.com/blog"
"##
}
