//! Image → tone grid.

use sg_core::PatternError;
use sg_core::config::{LayoutSpec, ToneConfig};
use sg_core::grid::{BrightnessGrid, ToneGrid};
use sg_source::resize::resize_nearest;

use crate::geometry::{Geometry, resolve_geometry};
use crate::quantize::{ToneQuantizer, preprocess};

/// Build the stitch grid for `image`.
///
/// The inner area is the nearest-neighbour resample of the whole image,
/// offset then inverted, then quantized. Everything outside it is tone 0.
///
/// # Errors
/// - [`PatternError::EmptyImage`] for a zero-sized image
/// - [`PatternError::InvalidToneCount`] for a tone count outside `2..=10`
/// - [`PatternError::InvalidLayout`] when padding leaves no inner area
///
/// # Example
/// ```
/// use sg_core::config::{LayoutSpec, ToneConfig};
/// use sg_core::grid::BrightnessGrid;
/// use sg_pattern::pattern::build_pattern;
///
/// let image = BrightnessGrid::new(2, 1, vec![0, 255]).unwrap();
/// let layout = LayoutSpec::fixed(1, 4);
/// let grid = build_pattern(&image, &layout, &ToneConfig::default()).unwrap();
/// assert_eq!(grid.as_raw(), &[0, 0, 3, 3]);
/// ```
pub fn build_pattern(
    image: &BrightnessGrid,
    layout: &LayoutSpec,
    tones: &ToneConfig,
) -> Result<ToneGrid, PatternError> {
    build_pattern_with_geometry(image, layout, tones).map(|(grid, _)| grid)
}

/// Same as [`build_pattern`], also returning the resolved geometry.
///
/// # Errors
/// See [`build_pattern`].
pub fn build_pattern_with_geometry(
    image: &BrightnessGrid,
    layout: &LayoutSpec,
    tones: &ToneConfig,
) -> Result<(ToneGrid, Geometry), PatternError> {
    if image.is_empty() {
        return Err(PatternError::EmptyImage);
    }
    let quantizer = ToneQuantizer::new(tones.tone_count)?;
    let geo = resolve_geometry(image.aspect(), layout)?;

    let small = resize_nearest(image, geo.inner_cols as u32, geo.inner_rows as u32)?;

    let mut grid = ToneGrid::new(geo.rows, geo.cols, tones.tone_count);
    for r in 0..geo.inner_rows {
        let row = grid.row_mut(geo.offset_row + r);
        let inner = &mut row[geo.offset_col..geo.offset_col + geo.inner_cols];
        for (c, cell) in inner.iter_mut().enumerate() {
            let value = f64::from(small.get(c as u32, r as u32)) / 255.0;
            *cell = quantizer.quantize(preprocess(value, tones));
        }
    }

    log::debug!(
        "Pattern {}x{} (inner {}x{} at row {}, col {}), {} tones",
        geo.cols,
        geo.rows,
        geo.inner_cols,
        geo.inner_rows,
        geo.offset_row,
        geo.offset_col,
        tones.tone_count
    );
    Ok((grid, geo))
}
