//! Chart geometry in output pixels.
//!
//! All sizes are computed in `u64` with checked or saturating arithmetic and bounded by
//! [`MAX_CHART_SIDE`] and [`MAX_CHART_PIXELS`] before being narrowed.

use sg_core::config::DisplayOptions;
use sg_core::grid::ToneGrid;

use crate::error::RenderError;

/// Smallest cell edge the chart will draw, in pixels.
pub const MIN_CELL: u32 = 4;

/// Largest chart width or height, in pixels.
pub const MAX_CHART_SIDE: u32 = 32_768;

/// Largest chart area, in pixels.
pub const MAX_CHART_PIXELS: u64 = 1 << 28;

/// Heading drawn above the legend swatches.
pub const LEGEND_HEADING: &str = "Tone";

/// Approximate advance of `chars` sans-serif glyphs at `font` px.
fn text_width(chars: usize, font: u64) -> u64 {
    (chars as u64).saturating_mul(font).saturating_mul(3) / 5
}

fn sum(parts: &[u64]) -> Option<u64> {
    parts.iter().try_fold(0u64, |acc, &p| acc.checked_add(p))
}

/// Tone legend column to the right of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendLayout {
    pub x: u32,
    /// Vertical center of the "Tone" heading.
    pub heading_y: u32,
    /// Top of the first swatch.
    pub y: u32,
    pub swatch: u32,
    pub gap: u32,
    pub tones: u8,
}

impl LegendLayout {
    /// Top-left corner of the swatch for `tone`.
    #[must_use]
    pub fn swatch_origin(&self, tone: u8) -> (u32, u32) {
        (self.x, self.y + u32::from(tone) * (self.swatch + self.gap))
    }

    /// Height of the swatch column, heading excluded.
    #[must_use]
    pub fn height(&self) -> u32 {
        let n = u32::from(self.tones);
        n * self.swatch + n.saturating_sub(1) * self.gap
    }
}

/// Pixel layout of a stitch chart.
///
/// # Example
/// ```
/// use sg_core::config::DisplayOptions;
/// use sg_core::grid::ToneGrid;
/// use sg_render::layout::ChartLayout;
///
/// let grid = ToneGrid::new(3, 4, 2);
/// let layout = ChartLayout::new(&grid, &DisplayOptions::default(), "").unwrap();
/// assert_eq!(layout.cell_origin(0, 1), (layout.grid_x + 12, layout.grid_y));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartLayout {
    pub rows: usize,
    pub cols: usize,
    pub cell: u32,
    pub font_size: u32,
    pub margin: u32,
    /// Band above the grid reserved for the title; 0 without one.
    pub title_height: u32,
    /// Top-left corner of the stitch grid.
    pub grid_x: u32,
    pub grid_y: u32,
    pub guide_step: Option<usize>,
    pub guide_width: u32,
    pub row_numbers: bool,
    /// Space between a row label's right edge and the grid.
    pub label_gap: u32,
    pub legend: Option<LegendLayout>,
    pub width: u32,
    pub height: u32,
}

impl ChartLayout {
    /// # Errors
    /// Returns [`RenderError::ChartTooLarge`] when the chart would exceed
    /// [`MAX_CHART_SIDE`] on a side or [`MAX_CHART_PIXELS`] in area.
    pub fn new(grid: &ToneGrid, display: &DisplayOptions, title: &str) -> Result<Self, RenderError> {
        let cell = display.cell_size.max(MIN_CELL);
        let too_large = || RenderError::ChartTooLarge {
            rows: grid.rows,
            cols: grid.cols,
            cell,
            max_side: MAX_CHART_SIDE,
            max_pixels: MAX_CHART_PIXELS,
        };

        let cell64 = u64::from(cell);
        let font = (cell64 * 3 / 5).max(8);
        let margin = cell64.max(8);
        let label_gap = (margin / 2).max(2);
        let title_height = if title.is_empty() { 0 } else { font * 2 };

        let label_width = if display.show_row_numbers {
            text_width(grid.rows.to_string().len(), font).saturating_add(label_gap)
        } else {
            0
        };
        let grid_x = margin.saturating_add(label_width);
        let grid_y = margin + title_height;
        let grid_w = (grid.cols as u64).checked_mul(cell64).ok_or_else(too_large)?;
        let grid_h = (grid.rows as u64).checked_mul(cell64).ok_or_else(too_large)?;
        let grid_right = sum(&[grid_x, grid_w, 1]).ok_or_else(too_large)?;
        let grid_bottom = sum(&[grid_y, grid_h, 1]).ok_or_else(too_large)?;

        let mut right = grid_right;
        let mut bottom = grid_bottom;
        let mut legend = None;
        if display.show_legend {
            let heading = font * 3 / 2;
            let swatch = (cell64 * 2).max(font + 6);
            let gap = (cell64 / 3).max(2);
            let n = u64::from(grid.tone_count);
            let x = sum(&[grid_right, margin]).ok_or_else(too_large)?;
            let y = grid_y.saturating_add(heading);
            let column_w = swatch.max(text_width(LEGEND_HEADING.len(), font));
            let column_h = n * swatch + n.saturating_sub(1) * gap;
            right = sum(&[x, column_w]).ok_or_else(too_large)?;
            bottom = bottom.max(y.saturating_add(column_h));
            legend = Some((x, grid_y + heading / 2, y, swatch, gap));
        }
        right = right.max(margin.saturating_add(text_width(title.chars().count(), font)));

        let width = right.saturating_add(margin);
        let height = bottom.saturating_add(margin);
        if width > u64::from(MAX_CHART_SIDE)
            || height > u64::from(MAX_CHART_SIDE)
            || width * height > MAX_CHART_PIXELS
        {
            return Err(too_large());
        }

        // Every value below is bounded by `width` or `height`.
        Ok(Self {
            rows: grid.rows,
            cols: grid.cols,
            cell,
            font_size: font as u32,
            margin: margin as u32,
            title_height: title_height as u32,
            grid_x: grid_x as u32,
            grid_y: grid_y as u32,
            guide_step: display.guide_step(),
            guide_width: (cell / 6).max(2),
            row_numbers: display.show_row_numbers,
            label_gap: label_gap as u32,
            legend: legend.map(|(x, heading_y, y, swatch, gap)| LegendLayout {
                x: x as u32,
                heading_y: heading_y as u32,
                y: y as u32,
                swatch: swatch as u32,
                gap: gap as u32,
                tones: grid.tone_count,
            }),
            width: width as u32,
            height: height as u32,
        })
    }

    #[must_use]
    pub fn grid_width(&self) -> u32 {
        self.cols as u32 * self.cell
    }

    #[must_use]
    pub fn grid_height(&self) -> u32 {
        self.rows as u32 * self.cell
    }

    #[must_use]
    pub fn cell_origin(&self, row: usize, col: usize) -> (u32, u32) {
        (
            self.grid_x + col as u32 * self.cell,
            self.grid_y + row as u32 * self.cell,
        )
    }

    /// Crochet row label for grid row `row` (top row = 0); row 1 is the bottom.
    #[must_use]
    pub fn row_label(&self, row: usize) -> String {
        (self.rows - row).to_string()
    }

    /// Right edge and vertical center of the label for `row`.
    #[must_use]
    pub fn row_label_anchor(&self, row: usize) -> (u32, f32) {
        let (_, y) = self.cell_origin(row, 0);
        (
            self.grid_x.saturating_sub(self.label_gap),
            y as f32 + self.cell as f32 / 2.0,
        )
    }

    /// Whether boundary `k` (0..=n) along an axis is a guide line.
    #[must_use]
    pub fn is_guide_boundary(&self, k: usize) -> bool {
        self.guide_step.is_some_and(|step| k % step == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(cell: u32) -> DisplayOptions {
        DisplayOptions {
            cell_size: cell,
            ..DisplayOptions::default()
        }
    }

    #[test]
    fn row_labels_count_from_bottom() {
        let grid = ToneGrid::new(5, 2, 2);
        let layout = ChartLayout::new(&grid, &display(12), "").unwrap();
        assert_eq!(layout.row_label(0), "5");
        assert_eq!(layout.row_label(4), "1");
    }

    #[test]
    fn guides_every_step_from_top_left() {
        let grid = ToneGrid::new(20, 20, 2);
        let layout = ChartLayout::new(&grid, &display(12), "").unwrap();
        assert!(layout.is_guide_boundary(0));
        assert!(!layout.is_guide_boundary(1));
        assert!(layout.is_guide_boundary(10));
        assert!(layout.is_guide_boundary(20));

        let hidden = DisplayOptions {
            show_guides: false,
            ..display(12)
        };
        let layout = ChartLayout::new(&grid, &hidden, "").unwrap();
        assert!(!layout.is_guide_boundary(10));
    }

    #[test]
    fn title_reserves_a_band_above_the_grid() {
        let grid = ToneGrid::new(4, 4, 2);
        let bare = ChartLayout::new(&grid, &display(12), "").unwrap();
        let titled = ChartLayout::new(&grid, &display(12), "Crochet Grid Pattern").unwrap();
        assert_eq!(bare.title_height, 0);
        assert!(titled.title_height > 0);
        assert_eq!(titled.grid_y, bare.grid_y + titled.title_height);
        assert!(titled.width >= titled.margin * 2 + 20 * titled.font_size * 3 / 5);
    }

    #[test]
    fn legend_sits_right_of_grid_below_its_heading() {
        let grid = ToneGrid::new(4, 4, 3);
        let layout = ChartLayout::new(&grid, &display(12), "").unwrap();
        let legend = layout.legend.unwrap();
        assert!(legend.x > layout.grid_x + layout.grid_width());
        assert!(legend.heading_y < legend.y);
        let (_, sy) = legend.swatch_origin(2);
        assert_eq!(sy, legend.y + 2 * (legend.swatch + legend.gap));
        assert!(layout.width >= legend.x + legend.swatch);
        assert!(layout.height >= legend.y + legend.height());
    }

    #[test]
    fn no_legend_no_row_numbers_shrinks_chart() {
        let grid = ToneGrid::new(4, 4, 3);
        let full = ChartLayout::new(&grid, &display(12), "").unwrap();
        let bare = ChartLayout::new(
            &grid,
            &DisplayOptions {
                show_legend: false,
                show_row_numbers: false,
                ..display(12)
            },
            "",
        )
        .unwrap();
        assert!(bare.legend.is_none());
        assert!(bare.width < full.width);
        assert_eq!(bare.grid_x, bare.margin);
    }

    #[test]
    fn row_label_is_left_of_grid() {
        let grid = ToneGrid::new(12, 3, 2);
        let layout = ChartLayout::new(&grid, &display(14), "").unwrap();
        let (x, y) = layout.row_label_anchor(0);
        assert!(x < layout.grid_x);
        assert!(y > layout.grid_y as f32);
    }

    #[test]
    fn huge_cell_size_is_an_error() {
        let grid = ToneGrid::new(2, 2, 2);
        let err = ChartLayout::new(&grid, &display(3_000_000_000), "").unwrap_err();
        assert!(matches!(err, RenderError::ChartTooLarge { cell: 3_000_000_000, .. }));
    }

    #[test]
    fn huge_grid_is_an_error() {
        let grid = ToneGrid::new(1, 400_000_000, 2);
        assert!(matches!(
            ChartLayout::new(&grid, &display(12), ""),
            Err(RenderError::ChartTooLarge { cols: 400_000_000, .. })
        ));
        let wide = ToneGrid::new(1, 3000, 2);
        assert!(ChartLayout::new(&wide, &display(12), "").is_err());
    }
}
