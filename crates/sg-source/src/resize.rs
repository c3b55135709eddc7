//! Rééchantillonnage au plus proche voisin.
//!
//! Nearest neighbour keeps one source sample per stitch: cell boundaries
//! stay crisp and no new intermediate tones are invented.

use fast_image_resize::images::Image;
use fast_image_resize::{PixelType, ResizeAlg, ResizeOptions, Resizer};
use sg_core::PatternError;
use sg_core::grid::BrightnessGrid;

/// Resample `grid` to exactly `width` × `height` pixels.
///
/// # Errors
/// Returns [`PatternError::EmptyImage`] if the source is empty and
/// [`PatternError::Resample`] if the target size is zero.
///
/// # Example
/// ```
/// use sg_core::grid::BrightnessGrid;
/// use sg_source::resize::resize_nearest;
/// let src = BrightnessGrid::new(1, 1, vec![200]).unwrap();
/// let out = resize_nearest(&src, 3, 2).unwrap();
/// assert_eq!(out.as_raw(), &[200; 6]);
/// ```
pub fn resize_nearest(
    grid: &BrightnessGrid,
    width: u32,
    height: u32,
) -> Result<BrightnessGrid, PatternError> {
    if grid.is_empty() {
        return Err(PatternError::EmptyImage);
    }
    if width == 0 || height == 0 {
        return Err(PatternError::Resample(format!(
            "target size {width}x{height} is empty"
        )));
    }
    if (width, height) == (grid.width, grid.height) {
        return Ok(grid.clone());
    }

    let src = Image::from_vec_u8(grid.width, grid.height, grid.as_raw().to_vec(), PixelType::U8)
        .map_err(|e| PatternError::Resample(e.to_string()))?;
    let mut dst = Image::new(width, height, PixelType::U8);
    let options = ResizeOptions::new().resize_alg(ResizeAlg::Nearest);
    Resizer::new()
        .resize(&src, &mut dst, &options)
        .map_err(|e| PatternError::Resample(e.to_string()))?;

    log::trace!(
        "Resampled {}x{} -> {width}x{height}",
        grid.width,
        grid.height
    );
    BrightnessGrid::new(width, height, dst.into_vec())
        .ok_or_else(|| PatternError::Resample("resampler returned a short buffer".into()))
}
