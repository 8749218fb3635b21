//! Golden-image regression checks.
//!
//! A rendered frame is compared against a blessed baseline PNG with a small
//! per-channel tolerance. Baselines are (re)created by running with the
//! `UPDATE_BASELINES` environment variable set; mismatches write the actual
//! image and an amplified diff next to the baseline for inspection.

use std::path::{Path, PathBuf};

use image::{ImageFormat, ImageReader, RgbaImage};

use crate::error::{SceneError, SceneResult};

/// Environment variable that switches comparison runs into bless mode.
pub const UPDATE_BASELINES_ENV: &str = "UPDATE_BASELINES";

/// Pixel-difference metrics between two equally sized images.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageDiff {
    pub width: u32,
    pub height: u32,
    /// Mean absolute per-channel error over RGB, in 0..=255 units.
    pub mean_error: f64,
    /// Largest absolute per-channel error over RGB.
    pub max_error: u8,
    /// Pixels whose RGB error exceeds the configured tolerance.
    pub differing_pixels: usize,
}

impl ImageDiff {
    #[must_use]
    pub fn total_pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// How a baseline comparison is performed.
#[derive(Debug, Clone)]
pub struct BaselineCheck {
    pub baseline_path: PathBuf,
    /// Per-channel tolerance in 0..=255 units; errors at or below it do not
    /// count a pixel as differing.
    pub per_channel_tolerance: u8,
    /// Number of differing pixels accepted before the check fails.
    pub max_differing_pixels: usize,
    /// Where mismatch artifacts are written; defaults to the baseline's
    /// parent directory.
    pub artifact_dir: Option<PathBuf>,
}

impl BaselineCheck {
    #[must_use]
    pub fn new(baseline_path: impl Into<PathBuf>) -> Self {
        Self {
            baseline_path: baseline_path.into(),
            per_channel_tolerance: 2,
            max_differing_pixels: 0,
            artifact_dir: None,
        }
    }

    #[must_use]
    pub fn with_tolerance(mut self, per_channel_tolerance: u8) -> Self {
        self.per_channel_tolerance = per_channel_tolerance;
        self
    }

    #[must_use]
    pub fn with_max_differing_pixels(mut self, max_differing_pixels: usize) -> Self {
        self.max_differing_pixels = max_differing_pixels;
        self
    }

    #[must_use]
    pub fn with_artifact_dir(mut self, artifact_dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = Some(artifact_dir.into());
        self
    }
}

/// Result of one baseline comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum RegressionOutcome {
    Passed(ImageDiff),
    Mismatch(ImageDiff),
    BaselineMissing,
    BaselineUpdated,
}

impl RegressionOutcome {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Passed(_) | Self::BaselineUpdated)
    }

    /// Process exit code convention: 0 on success, 1 otherwise — the logical
    /// negation of the comparison's success.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.succeeded())
    }
}

/// Computes per-channel RGB difference metrics.
///
/// Alpha is ignored; both images must have identical dimensions.
pub fn compare_images(
    actual: &RgbaImage,
    baseline: &RgbaImage,
    per_channel_tolerance: u8,
) -> SceneResult<ImageDiff> {
    if actual.dimensions() != baseline.dimensions() {
        return Err(SceneError::InvalidData(format!(
            "image dimensions differ: actual {}x{}, baseline {}x{}",
            actual.width(),
            actual.height(),
            baseline.width(),
            baseline.height()
        )));
    }

    let mut sum_error = 0_u64;
    let mut max_error = 0_u8;
    let mut differing_pixels = 0_usize;

    for (actual_pixel, baseline_pixel) in actual.pixels().zip(baseline.pixels()) {
        let errors = [
            actual_pixel.0[0].abs_diff(baseline_pixel.0[0]),
            actual_pixel.0[1].abs_diff(baseline_pixel.0[1]),
            actual_pixel.0[2].abs_diff(baseline_pixel.0[2]),
        ];
        let pixel_max = errors.into_iter().max().unwrap_or(0);
        sum_error += u64::from(errors[0]) + u64::from(errors[1]) + u64::from(errors[2]);
        max_error = max_error.max(pixel_max);
        if pixel_max > per_channel_tolerance {
            differing_pixels += 1;
        }
    }

    let channel_count = actual.width() as u64 * actual.height() as u64 * 3;
    Ok(ImageDiff {
        width: actual.width(),
        height: actual.height(),
        mean_error: if channel_count == 0 {
            0.0
        } else {
            sum_error as f64 / channel_count as f64
        },
        max_error,
        differing_pixels,
    })
}

/// Amplified absolute difference image for mismatch inspection.
#[must_use]
pub fn diff_image(actual: &RgbaImage, baseline: &RgbaImage) -> RgbaImage {
    let width = actual.width().min(baseline.width());
    let height = actual.height().min(baseline.height());
    RgbaImage::from_fn(width, height, |x, y| {
        let a = actual.get_pixel(x, y).0;
        let b = baseline.get_pixel(x, y).0;
        let amplify = |lhs: u8, rhs: u8| lhs.abs_diff(rhs).saturating_mul(8);
        image::Rgba([
            amplify(a[0], b[0]),
            amplify(a[1], b[1]),
            amplify(a[2], b[2]),
            255,
        ])
    })
}

/// Compares `actual` against the configured baseline.
///
/// In bless mode (`UPDATE_BASELINES` set to `1` or `true`) the baseline is
/// rewritten and the check reports `BaselineUpdated`.
pub fn check_against_baseline(
    actual: &RgbaImage,
    check: &BaselineCheck,
) -> SceneResult<RegressionOutcome> {
    if bless_requested() {
        if let Some(parent) = check.baseline_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SceneError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        actual.save_with_format(&check.baseline_path, ImageFormat::Png)?;
        tracing::info!(baseline = %check.baseline_path.display(), "baseline updated");
        return Ok(RegressionOutcome::BaselineUpdated);
    }

    if !check.baseline_path.exists() {
        tracing::warn!(baseline = %check.baseline_path.display(), "baseline missing");
        return Ok(RegressionOutcome::BaselineMissing);
    }

    let baseline = load_png(&check.baseline_path)?;
    let diff = compare_images(actual, &baseline, check.per_channel_tolerance)?;

    if diff.differing_pixels <= check.max_differing_pixels {
        tracing::debug!(
            mean_error = diff.mean_error,
            max_error = diff.max_error,
            "baseline comparison passed"
        );
        return Ok(RegressionOutcome::Passed(diff));
    }

    let artifact_dir = check
        .artifact_dir
        .clone()
        .or_else(|| check.baseline_path.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    write_mismatch_artifacts(actual, &baseline, &check.baseline_path, &artifact_dir)?;

    tracing::warn!(
        differing_pixels = diff.differing_pixels,
        max_error = diff.max_error,
        "baseline comparison failed"
    );
    Ok(RegressionOutcome::Mismatch(diff))
}

pub fn load_png(path: &Path) -> SceneResult<RgbaImage> {
    let reader = ImageReader::open(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(reader.decode()?.to_rgba8())
}

fn bless_requested() -> bool {
    std::env::var(UPDATE_BASELINES_ENV)
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn write_mismatch_artifacts(
    actual: &RgbaImage,
    baseline: &RgbaImage,
    baseline_path: &Path,
    artifact_dir: &Path,
) -> SceneResult<()> {
    std::fs::create_dir_all(artifact_dir).map_err(|source| SceneError::Io {
        path: artifact_dir.to_path_buf(),
        source,
    })?;

    let stem = baseline_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("baseline");
    let actual_path = artifact_dir.join(format!("{stem}.actual.png"));
    let diff_path = artifact_dir.join(format!("{stem}.diff.png"));

    actual.save_with_format(&actual_path, ImageFormat::Png)?;
    diff_image(actual, baseline).save_with_format(&diff_path, ImageFormat::Png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, image::Rgba(rgba))
    }

    #[test]
    fn identical_images_have_zero_error() {
        let image = solid(4, 4, [10, 20, 30, 255]);
        let diff = compare_images(&image, &image, 0).expect("same size");
        assert_eq!(diff.mean_error, 0.0);
        assert_eq!(diff.max_error, 0);
        assert_eq!(diff.differing_pixels, 0);
        assert_eq!(diff.total_pixels(), 16);
    }

    #[test]
    fn single_channel_shift_is_measured() {
        let actual = solid(2, 2, [10, 20, 30, 255]);
        let baseline = solid(2, 2, [10, 20, 36, 255]);
        let diff = compare_images(&actual, &baseline, 2).expect("same size");
        assert_eq!(diff.max_error, 6);
        assert_eq!(diff.differing_pixels, 4);
        assert!((diff.mean_error - 2.0).abs() < 1e-12);
    }

    #[test]
    fn tolerance_absorbs_small_errors() {
        let actual = solid(2, 2, [10, 20, 30, 255]);
        let baseline = solid(2, 2, [11, 21, 31, 255]);
        let diff = compare_images(&actual, &baseline, 2).expect("same size");
        assert_eq!(diff.differing_pixels, 0);
        assert_eq!(diff.max_error, 1);
    }

    #[test]
    fn alpha_differences_are_ignored() {
        let actual = solid(2, 2, [10, 20, 30, 255]);
        let baseline = solid(2, 2, [10, 20, 30, 0]);
        let diff = compare_images(&actual, &baseline, 0).expect("same size");
        assert_eq!(diff.max_error, 0);
    }

    #[test]
    fn size_mismatch_is_an_error() {
        let actual = solid(2, 2, [0, 0, 0, 255]);
        let baseline = solid(3, 2, [0, 0, 0, 255]);
        assert!(compare_images(&actual, &baseline, 0).is_err());
    }

    #[test]
    fn diff_image_amplifies_errors() {
        let actual = solid(2, 2, [10, 0, 0, 255]);
        let baseline = solid(2, 2, [13, 0, 0, 255]);
        let diff = diff_image(&actual, &baseline);
        assert_eq!(diff.get_pixel(0, 0).0, [24, 0, 0, 255]);
    }

    #[test]
    fn exit_codes_follow_the_negation_convention() {
        let diff = ImageDiff {
            width: 1,
            height: 1,
            mean_error: 0.0,
            max_error: 0,
            differing_pixels: 0,
        };
        assert_eq!(RegressionOutcome::Passed(diff).exit_code(), 0);
        assert_eq!(RegressionOutcome::BaselineUpdated.exit_code(), 0);
        assert_eq!(RegressionOutcome::Mismatch(diff).exit_code(), 1);
        assert_eq!(RegressionOutcome::BaselineMissing.exit_code(), 1);
    }

    #[test]
    fn missing_baseline_is_reported() {
        let actual = solid(2, 2, [0, 0, 0, 255]);
        let check = BaselineCheck::new("target/test_out/never_blessed_baseline.png");
        // Guard: only meaningful when not running in bless mode.
        if std::env::var(UPDATE_BASELINES_ENV).is_err() {
            let outcome = check_against_baseline(&actual, &check).expect("io ok");
            assert_eq!(outcome, RegressionOutcome::BaselineMissing);
        }
    }
}
