//! Chart rendering: gridlines, guides, row numbers and tone legend.
//!
//! A `ToneGrid` plus its `Colormap` is the complete chart state. The chart
//! is described once as SVG and can be redrawn as SVG, PNG or PDF at any
//! cell size without touching the image.

pub mod error;
pub mod layout;
pub mod renderer;
pub mod svg;

pub use error::RenderError;
pub use renderer::ChartRenderer;

use sg_core::grid::ToneGrid;

/// Heading used on exported charts.
///
/// # Example
/// ```
/// use sg_core::grid::ToneGrid;
/// use sg_render::chart_title;
/// let grid = ToneGrid::new(139, 100, 4);
/// assert_eq!(
///     chart_title(&grid, false),
///     "Crochet Grid Pattern (100×139, 4 tones, Grayscale). Row numbers: 1 bottom, 139 top"
/// );
/// ```
#[must_use]
pub fn chart_title(grid: &ToneGrid, use_color: bool) -> String {
    let mode = if use_color { "Colors" } else { "Grayscale" };
    format!(
        "Crochet Grid Pattern ({}×{}, {} tones, {mode}). Row numbers: 1 bottom, {} top",
        grid.cols, grid.rows, grid.tone_count, grid.rows
    )
}
