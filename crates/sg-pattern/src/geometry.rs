//! Grid sizing: aspect linkage, padding and the inner content area.

use sg_core::PatternError;
use sg_core::config::{Axis, LayoutSpec, MAX_AUTO_PAD_PERCENT, check_grid_size};

/// Padding in stitches on each side of the inner area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub left: usize,
    pub right: usize,
    pub top: usize,
    pub bottom: usize,
}

impl Padding {
    #[must_use]
    pub fn uniform(pad: usize) -> Self {
        Self {
            left: pad,
            right: pad,
            top: pad,
            bottom: pad,
        }
    }
}

/// Resolved output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Full grid size, after aspect linkage.
    pub rows: usize,
    pub cols: usize,
    /// Image content area inside the padding.
    pub inner_rows: usize,
    pub inner_cols: usize,
    pub offset_row: usize,
    pub offset_col: usize,
    pub padding: Padding,
}

/// Round to nearest, ties away from zero for the non-negative values used here.
#[inline]
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Sanitized width / height ratio; degenerate ratios behave as square.
fn usable_aspect(source_aspect: f64) -> f64 {
    if source_aspect.is_finite() && source_aspect > 0.0 {
        source_aspect
    } else {
        1.0
    }
}

/// Recompute the dimension that did not change so the grid follows the
/// source image's width / height ratio.
///
/// `changed` names the dimension the caller just set; the other one is
/// derived from it and clamped to at least 1.
///
/// # Example
/// ```
/// use sg_core::config::Axis;
/// use sg_pattern::geometry::link_dimensions;
/// assert_eq!(link_dimensions(2.0, 0, 100, Axis::Cols), (50, 100));
/// assert_eq!(link_dimensions(2.0, 50, 0, Axis::Rows), (50, 100));
/// ```
#[must_use]
pub fn link_dimensions(source_aspect: f64, rows: usize, cols: usize, changed: Axis) -> (usize, usize) {
    let aspect = usable_aspect(source_aspect);
    match changed {
        Axis::Rows => {
            let cols = round_half_up(rows as f64 * aspect).max(1.0) as usize;
            (rows, cols)
        }
        Axis::Cols => {
            let rows = round_half_up(cols as f64 / aspect).max(1.0) as usize;
            (rows, cols)
        }
    }
}

/// Border width for auto padding: `percent` of the smaller grid dimension.
///
/// # Example
/// ```
/// use sg_pattern::geometry::auto_padding;
/// assert_eq!(auto_padding(100, 100, 10), 10);
/// assert_eq!(auto_padding(139, 100, 5), 5);
/// ```
#[must_use]
pub fn auto_padding(rows: usize, cols: usize, percent: u8) -> usize {
    let pct = f64::from(percent.min(MAX_AUTO_PAD_PERCENT));
    round_half_up(rows.min(cols) as f64 * pct / 100.0) as usize
}

/// Resolve the final grid size, padding and inner content offsets.
///
/// # Errors
/// Returns [`PatternError::GridTooLarge`] if aspect linkage produced an
/// oversized grid and [`PatternError::InvalidLayout`] if the padding leaves
/// no inner area.
///
/// # Example
/// ```
/// use sg_core::config::LayoutSpec;
/// use sg_pattern::geometry::resolve_geometry;
/// let mut layout = LayoutSpec::fixed(100, 100);
/// layout.auto_pad_percent = Some(10);
/// let geo = resolve_geometry(1.0, &layout).unwrap();
/// assert_eq!((geo.inner_rows, geo.inner_cols), (80, 80));
/// assert_eq!((geo.offset_row, geo.offset_col), (10, 10));
/// ```
pub fn resolve_geometry(source_aspect: f64, layout: &LayoutSpec) -> Result<Geometry, PatternError> {
    let (rows, cols) = if layout.keep_aspect {
        link_dimensions(source_aspect, layout.rows, layout.cols, layout.drive)
    } else {
        (layout.rows, layout.cols)
    };
    check_grid_size(rows, cols)?;

    let padding = match layout.auto_pad_percent {
        Some(pct) => Padding::uniform(auto_padding(rows, cols, pct)),
        None => Padding {
            left: layout.pad_left,
            right: layout.pad_right,
            top: layout.pad_top,
            bottom: layout.pad_bottom,
        },
    };

    let inner_rows = rows as i64 - padding.top as i64 - padding.bottom as i64;
    let inner_cols = cols as i64 - padding.left as i64 - padding.right as i64;
    if inner_rows <= 0 || inner_cols <= 0 {
        return Err(PatternError::InvalidLayout {
            rows,
            cols,
            inner_rows,
            inner_cols,
        });
    }

    Ok(Geometry {
        rows,
        cols,
        inner_rows: inner_rows as usize,
        inner_cols: inner_cols as usize,
        offset_row: padding.top,
        offset_col: padding.left,
        padding,
    })
}
